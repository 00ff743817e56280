//! Family group routes.

use crate::client::{segment, ApiClient, Body, Method, Transport};
use crate::error::ApiError;
use crate::models::{Envelope, FamiliesData, Family, FamilyData, FamilyInput, Id};

impl<T: Transport> ApiClient<T> {
    pub async fn list_families(&self) -> Result<Vec<Family>, ApiError> {
        let envelope: Envelope<FamiliesData> = self
            .call(Method::Get, "/families".into(), Body::Empty, "Failed to load families")
            .await?;
        Ok(envelope.data.families)
    }

    pub async fn get_family(&self, id: &Id) -> Result<Family, ApiError> {
        let id = segment(id.as_str(), "Failed to load family")?;
        let envelope: Envelope<FamilyData> = self
            .call(
                Method::Get,
                format!("/families/{id}"),
                Body::Empty,
                "Failed to load family",
            )
            .await?;
        Ok(envelope.data.family)
    }

    pub async fn create_family(&self, input: &FamilyInput) -> Result<(), ApiError> {
        self.submit(
            Method::Post,
            "/families".into(),
            Body::json(input)?,
            "Failed to create family",
        )
        .await
    }

    pub async fn update_family(&self, id: &Id, input: &FamilyInput) -> Result<(), ApiError> {
        let id = segment(id.as_str(), "Failed to update family")?;
        self.submit(
            Method::Put,
            format!("/families/{id}"),
            Body::json(input)?,
            "Failed to update family",
        )
        .await
    }

    pub async fn delete_family(&self, id: &Id) -> Result<(), ApiError> {
        let id = segment(id.as_str(), "Failed to delete family")?;
        self.submit(
            Method::Delete,
            format!("/families/{id}"),
            Body::Empty,
            "Failed to delete family",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::client;
    use crate::{ApiError, FamilyInput, Id, Method};
    use serde_json::json;

    #[tokio::test]
    async fn test_list_families_unwraps_envelope() {
        let (api, mock, _) = client(Some("tok"));
        mock.respond(
            Method::Get,
            "/families",
            200,
            &json!({"status":"success","data":{"families":[
                {"_id":"f1","name":"Dupont","children":[{"id":1,"firstName":"A","lastName":"B"}]},
                {"_id":"f2","name":"Martin"}
            ]}}),
        );
        let families = api.list_families().await.unwrap();
        assert_eq!(families.len(), 2);
        assert_eq!(families[0].child_count(), 1);
        assert_eq!(mock.requests()[0].bearer.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_create_failure_carries_server_message() {
        let (api, mock, _) = client(Some("tok"));
        mock.respond(
            Method::Post,
            "/families",
            400,
            &json!({"status":"error","message":"Name already used"}),
        );
        let err = api
            .create_family(&FamilyInput {
                name: "Dupont".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Name already used");

        let sent = &mock.requests()[0];
        match &sent.body {
            crate::Body::Json(v) => assert_eq!(v["name"], "Dupont"),
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_network_failure_uses_fallback() {
        let (api, mock, _) = client(None);
        mock.fail(Method::Delete, "/families/f1", "connection refused");
        let err = api.delete_family(&Id::from("f1")).await.unwrap_err();
        assert_eq!(err, ApiError::Network("Failed to delete family".into()));
    }

    #[tokio::test]
    async fn test_family_id_is_escaped_in_path() {
        let (api, mock, _) = client(Some("tok"));
        let _ = api.delete_family(&Id::from("f1/children")).await;
        assert_eq!(mock.requests()[0].path, "/families/f1%2Fchildren");
    }

    #[tokio::test]
    async fn test_malformed_success_is_decode_error() {
        let (api, mock, _) = client(Some("tok"));
        mock.respond_raw(Method::Get, "/families/f1", 200, r#"{"data":{}}"#);
        let err = api.get_family(&Id::from("f1")).await.unwrap_err();
        assert_eq!(err, ApiError::Decode("Failed to load family".into()));
    }
}
