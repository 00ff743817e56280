//! Child routes. Children are reachable both through their family
//! (`/families/:id/children`) and through the signed-in user (`/user/children`).

use crate::client::{segment, ApiClient, Body, Method, Transport};
use crate::error::ApiError;
use crate::models::{Child, ChildData, ChildInput, ChildrenData, Envelope, Id};

impl<T: Transport> ApiClient<T> {
    pub async fn list_children(&self, family: &Id) -> Result<Vec<Child>, ApiError> {
        let family = segment(family.as_str(), "Failed to load children")?;
        let envelope: Envelope<ChildrenData> = self
            .call(
                Method::Get,
                format!("/families/{family}/children"),
                Body::Empty,
                "Failed to load children",
            )
            .await?;
        Ok(envelope.data.children)
    }

    pub async fn get_child(&self, family: &Id, child: &Id) -> Result<Child, ApiError> {
        let family = segment(family.as_str(), "Failed to load child")?;
        let child = segment(child.as_str(), "Failed to load child")?;
        let envelope: Envelope<ChildData> = self
            .call(
                Method::Get,
                format!("/families/{family}/children/{child}"),
                Body::Empty,
                "Failed to load child",
            )
            .await?;
        Ok(envelope.data.child)
    }

    pub async fn create_child(&self, family: &Id, input: &ChildInput) -> Result<(), ApiError> {
        let family = segment(family.as_str(), "Failed to add child")?;
        self.submit(
            Method::Post,
            format!("/families/{family}/children"),
            Body::json(input)?,
            "Failed to add child",
        )
        .await
    }

    pub async fn update_child(
        &self,
        family: &Id,
        child: &Id,
        input: &ChildInput,
    ) -> Result<(), ApiError> {
        let family = segment(family.as_str(), "Failed to update child")?;
        let child = segment(child.as_str(), "Failed to update child")?;
        self.submit(
            Method::Put,
            format!("/families/{family}/children/{child}"),
            Body::json(input)?,
            "Failed to update child",
        )
        .await
    }

    pub async fn delete_child(&self, family: &Id, child: &Id) -> Result<(), ApiError> {
        let family = segment(family.as_str(), "Failed to delete child")?;
        let child = segment(child.as_str(), "Failed to delete child")?;
        self.submit(
            Method::Delete,
            format!("/families/{family}/children/{child}"),
            Body::Empty,
            "Failed to delete child",
        )
        .await
    }

    /// `GET /user/children` answers with a bare array.
    pub async fn my_children(&self) -> Result<Vec<Child>, ApiError> {
        let children: Option<Vec<Child>> = self
            .call(
                Method::Get,
                "/user/children".into(),
                Body::Empty,
                "Failed to load children",
            )
            .await?;
        Ok(children.unwrap_or_default())
    }

    pub async fn create_my_child(&self, input: &ChildInput) -> Result<(), ApiError> {
        self.submit(
            Method::Post,
            "/user/children".into(),
            Body::json(input)?,
            "Failed to add child",
        )
        .await
    }

    pub async fn update_my_child(&self, child: &Id, input: &ChildInput) -> Result<(), ApiError> {
        let child = segment(child.as_str(), "Failed to update child")?;
        self.submit(
            Method::Put,
            format!("/user/children/{child}"),
            Body::json(input)?,
            "Failed to update child",
        )
        .await
    }

    pub async fn delete_my_child(&self, child: &Id) -> Result<(), ApiError> {
        let child = segment(child.as_str(), "Failed to delete child")?;
        self.submit(
            Method::Delete,
            format!("/user/children/{child}"),
            Body::Empty,
            "Failed to delete child",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::client;
    use crate::{Body, ChildInput, Id, Method};
    use serde_json::json;

    #[tokio::test]
    async fn test_family_children_paths() {
        let (api, mock, _) = client(Some("tok"));
        mock.respond(
            Method::Get,
            "/families/7/children",
            200,
            &json!({"status":"success","data":{"children":[
                {"id":3,"firstName":"Léa","lastName":"Dupont","dateOfBirth":"2015-04-02T00:00:00Z"}
            ]}}),
        );
        mock.respond(Method::Delete, "/families/7/children/3", 200, &json!({"status":"success"}));

        let family = Id::from("7");
        let children = api.list_children(&family).await.unwrap();
        assert_eq!(children[0].birth_day(), Some("2015-04-02"));

        api.delete_child(&family, &children[0].id).await.unwrap();
        let deletes = mock.requests_with(Method::Delete);
        assert_eq!(deletes.len(), 1);
        assert_eq!(deletes[0].path, "/families/7/children/3");
    }

    #[tokio::test]
    async fn test_my_children_bare_array() {
        let (api, mock, _) = client(Some("tok"));
        mock.respond(
            Method::Get,
            "/user/children",
            200,
            &json!([{"_id":"c1","firstName":"Tom","lastName":"Martin","gender":"M"}]),
        );
        let children = api.my_children().await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].gender.as_deref(), Some("M"));
    }

    #[tokio::test]
    async fn test_update_my_child_sends_input() {
        let (api, mock, _) = client(Some("tok"));
        mock.respond(Method::Put, "/user/children/c1", 200, &json!({}));
        let input = ChildInput {
            first_name: "Tom".into(),
            last_name: "Martin".into(),
            birth_date: "2019-01-01".into(),
            notes: Some("allergic to peanuts".into()),
            ..Default::default()
        };
        api.update_my_child(&Id::from("c1"), &input).await.unwrap();
        let Body::Json(sent) = &mock.requests()[0].body else {
            panic!("expected json body");
        };
        assert_eq!(sent["birthDate"], "2019-01-01");
        assert_eq!(sent["notes"], "allergic to peanuts");
        assert!(sent.get("gender").is_none());
    }

    #[tokio::test]
    async fn test_child_ids_are_escaped_in_path() {
        let (api, mock, _) = client(Some("tok"));
        let _ = api.get_child(&Id::from("f 1"), &Id::from("c?1")).await;
        assert_eq!(mock.requests()[0].path, "/families/f%201/children/c%3F1");
    }
}
