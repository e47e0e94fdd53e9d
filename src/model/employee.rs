use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employee as returned by the remote API. The backend owns the record; the
/// console only ever holds a cached copy that is refetched after mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": "EMP-001",
        "full_name": "John Doe",
        "email": "john.doe@company.com",
        "department": "Engineering"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    /// Human-assigned code, distinct from `id`. The wire name is `employee_id`.
    #[serde(rename = "employee_id", default)]
    #[schema(example = "EMP-001")]
    pub employee_code: String,

    #[serde(default)]
    #[schema(example = "John Doe")]
    pub full_name: String,

    #[serde(default)]
    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[serde(default)]
    #[schema(example = "Engineering")]
    pub department: String,
}

/// Create request body for `POST /employees/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewEmployee {
    #[serde(rename = "employee_id", default)]
    #[schema(example = "EMP-001")]
    pub employee_code: String,
    #[serde(default)]
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[serde(default)]
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "Engineering")]
    pub department: String,
}

impl NewEmployee {
    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            employee_code: self.employee_code.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            department: self.department.trim().to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        [
            &self.employee_code,
            &self.full_name,
            &self.email,
            &self.department,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}
