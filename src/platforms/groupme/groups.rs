//! Group listing for GroupMe

use reqwest::Request;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::client::Transport;
use super::types::Group;
use crate::error::{Error, Result, ServiceError};

/// Resource path of the group listing
const GROUPS_PATH: &str = "/groups";

/// Wire token for the `omit` query parameter
///
/// The API takes a string where a boolean would do: `"memberships"` drops
/// member lists from the response, and an empty string keeps them. The
/// parameter is sent either way.
pub fn omit_param(omit_memberships: bool) -> &'static str {
    if omit_memberships {
        "memberships"
    } else {
        ""
    }
}

/// Paging and display options for a group listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupsQuery {
    /// Page to fetch; indexing and bounds are up to the service
    pub page: i64,
    /// Groups per page; the upper bound is enforced by the service
    pub per_page: i64,
    pub omit_memberships: bool,
}

impl GroupsQuery {
    pub fn new(page: i64, per_page: i64) -> Self {
        GroupsQuery {
            page,
            per_page,
            omit_memberships: false,
        }
    }

    pub fn omit_memberships(mut self, omit: bool) -> Self {
        self.omit_memberships = omit;
        self
    }

    /// Query parameters in wire order
    pub fn query_pairs<'a>(&self, token: &'a str) -> [(&'static str, std::borrow::Cow<'a, str>); 4] {
        [
            ("token", token.into()),
            ("page", self.page.to_string().into()),
            ("per_page", self.per_page.to_string().into()),
            ("omit", omit_param(self.omit_memberships).into()),
        ]
    }
}

/// Classification of a group listing body
#[derive(Debug, Clone, PartialEq)]
pub enum GroupsResponse {
    /// The body is an array of groups, possibly empty
    Groups(Vec<Group>),
    /// The body is the service's error envelope
    ServiceError(ServiceError),
    /// The body is neither
    Unrecognized,
}

impl GroupsResponse {
    /// Classify a raw body
    ///
    /// The success shape is tried first. Only a JSON array can satisfy it,
    /// so an error envelope (always an object) never passes as an empty list.
    /// The envelope must be a JSON object; serde would otherwise accept a
    /// positional array for it.
    pub fn decode(body: &[u8]) -> Self {
        if let Ok(groups) = serde_json::from_slice::<Vec<Group>>(body) {
            return GroupsResponse::Groups(groups);
        }
        let envelope = serde_json::from_slice::<Map<String, Value>>(body)
            .and_then(|map| ServiceError::deserialize(Value::Object(map)));
        match envelope {
            Ok(err) => GroupsResponse::ServiceError(err),
            Err(e) => {
                tracing::debug!(error = %e, "body matched neither groups nor error envelope");
                GroupsResponse::Unrecognized
            }
        }
    }

    pub fn into_result(self) -> Result<Vec<Group>> {
        match self {
            GroupsResponse::Groups(groups) => Ok(groups),
            GroupsResponse::ServiceError(err) => Err(err.into()),
            GroupsResponse::Unrecognized => Err(Error::unrecognized_response()),
        }
    }
}

impl Transport {
    /// Build the request for a group listing
    ///
    /// # API Endpoint
    /// GET /groups?token=..&page=..&per_page=..&omit=..
    pub fn build_user_groups_request(&self, token: &str, query: &GroupsQuery) -> Result<Request> {
        let url = self.endpoint(GROUPS_PATH)?;
        self.http_client
            .get(url)
            .query(&query.query_pairs(token)[..])
            .build()
            .map_err(|e| Error::invalid_argument(format!("Failed to build request: {}", e.without_url())))
    }

    /// Get the groups the token's user belongs to
    ///
    /// # Arguments
    /// * `token` - Access token, passed through unchecked
    /// * `page` - Page to fetch
    /// * `per_page` - Groups per page
    /// * `omit_memberships` - Leave member lists out of the response
    ///
    /// # Returns
    /// The groups on success. Otherwise one of: a network or read error from
    /// the transport, the service's error envelope, or the unrecognized
    /// response marker.
    pub fn user_groups(&self, token: &str, page: i64, per_page: i64, omit_memberships: bool) -> Result<Vec<Group>> {
        let query = GroupsQuery::new(page, per_page).omit_memberships(omit_memberships);
        self.user_groups_with(token, &query)
    }

    /// Same as [`Transport::user_groups`], taking a prepared query
    pub fn user_groups_with(&self, token: &str, query: &GroupsQuery) -> Result<Vec<Group>> {
        let request = self.build_user_groups_request(token, query)?;
        let response = self.send(request)?;
        let raw = self.read_body(response)?;

        GroupsResponse::decode(&raw.body)
            .into_result()
            .map_err(|e| e.with_http_status(raw.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, UNEXPECTED_RESPONSE};

    fn transport() -> Transport {
        Transport::default_transport().unwrap()
    }

    fn query_of(request: &Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_omit_param() {
        assert_eq!(omit_param(true), "memberships");
        assert_eq!(omit_param(false), "");
    }

    #[test]
    fn test_build_request() {
        let query = GroupsQuery::new(2, 10).omit_memberships(true);
        let request = transport().build_user_groups_request("abc123", &query).unwrap();

        assert_eq!(*request.method(), reqwest::Method::GET);
        assert_eq!(request.url().path(), "/v3/groups");
        assert!(request.body().is_none());
        assert_eq!(
            query_of(&request),
            vec![
                ("token".to_string(), "abc123".to_string()),
                ("page".to_string(), "2".to_string()),
                ("per_page".to_string(), "10".to_string()),
                ("omit".to_string(), "memberships".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_request_keeps_empty_omit() {
        let request = transport()
            .build_user_groups_request("abc123", &GroupsQuery::new(1, 5))
            .unwrap();

        let query = request.url().query().unwrap();
        assert!(query.ends_with("&omit="), "query was {query}");
    }

    #[test]
    fn test_decode_groups() {
        let body = br#"[{"id":"1","name":"g","type":"private","description":"","image_url":"",
            "creator_user_id":"2","created_at":1,"updated_at":2,"members":[],"share_url":"",
            "messages":{"count":0,"last_message_id":"","last_message_created_at":0,
            "preview":{"nickname":"","text":"","image_url":"","attachments":[]}}}]"#;

        match GroupsResponse::decode(body) {
            GroupsResponse::Groups(groups) => {
                assert_eq!(groups.len(), 1);
                assert_eq!(groups[0].name, "g");
            }
            other => panic!("expected groups, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_empty_array_is_success() {
        assert_eq!(GroupsResponse::decode(b"[]"), GroupsResponse::Groups(Vec::new()));
    }

    #[test]
    fn test_decode_error_envelope_is_never_empty_success() {
        let response = GroupsResponse::decode(br#"{"meta":{"code":400,"errors":["bad token","bad page"]}}"#);
        let err = response.into_result().unwrap_err();

        assert_eq!(err.code, ErrorCode::ServiceError);
        assert_eq!(err.to_string(), "bad token + bad page");
        assert_eq!(err.service_error().and_then(|e| e.code()), Some(400));
    }

    #[test]
    fn test_decode_envelope_without_meta() {
        let err = GroupsResponse::decode(br#"{"meta":null}"#).into_result().unwrap_err();
        assert!(err.is_service());
        assert_eq!(err.to_string(), UNEXPECTED_RESPONSE);
    }

    #[test]
    fn test_decode_unrecognized() {
        let bodies: [&[u8]; 6] = [b"42", b"{", b"null", b"\"text\"", b"", b"<html></html>"];
        for body in bodies {
            let response = GroupsResponse::decode(body);
            assert_eq!(response, GroupsResponse::Unrecognized, "body {:?}", String::from_utf8_lossy(body));
            assert!(response.into_result().unwrap_err().is_unrecognized());
        }
    }

    #[test]
    fn test_decode_array_of_wrong_shape_is_not_success() {
        // Arrays that fail the group schema are never read as an envelope
        let bodies: [&[u8]; 3] = [br#"[{"unexpected":true}]"#, b"[null]", b"[1]"];
        for body in bodies {
            assert_eq!(GroupsResponse::decode(body), GroupsResponse::Unrecognized);
        }
    }

    #[test]
    fn test_decode_attachment_without_charmap() {
        let body = br#"[{"id":"1","name":"g","created_at":1,"updated_at":2,
            "members":[{"nickname":"no id","muted":false}],
            "messages":{"count":1,"last_message_id":"m","last_message_created_at":2,
            "preview":{"nickname":"Jane","text":"look","image_url":null,
            "attachments":[{"type":"image","url":"https://i.groupme.com/1"}]}}}]"#;

        match GroupsResponse::decode(body) {
            GroupsResponse::Groups(groups) => {
                let attachment = &groups[0].messages.preview.attachments[0];
                assert_eq!(attachment.url.as_deref(), Some("https://i.groupme.com/1"));
                assert!(attachment.charmap.is_empty());
                assert_eq!(groups[0].members[0].user_id, "");
            }
            other => panic!("expected groups, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_lenient_meta() {
        let no_code = GroupsResponse::decode(br#"{"meta":{"errors":["x"]}}"#).into_result().unwrap_err();
        let null_errors = GroupsResponse::decode(br#"{"meta":{"code":400,"errors":null}}"#)
            .into_result()
            .unwrap_err();

        assert!(no_code.is_service());
        assert_eq!(no_code.to_string(), "x");
        assert!(null_errors.is_service());
        assert_eq!(null_errors.to_string(), "");
        assert_eq!(null_errors.service_error().and_then(|e| e.code()), Some(400));
    }
}
