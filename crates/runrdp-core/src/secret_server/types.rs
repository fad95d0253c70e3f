use serde::Deserialize;

/// Login for the secret server, supplied by the operator at run time.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct OperatorLogin {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for OperatorLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorLogin")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// A secret as returned by `GET /api/v1/secrets/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub secret_template_id: i64,
    #[serde(default)]
    pub items: Vec<SecretItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretItem {
    #[serde(default)]
    pub field_name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub item_value: String,
}

impl Secret {
    /// Value of the item whose field name or slug is `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.field_name == name || item.slug == name)
            .map(|item| item.item_value.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}
