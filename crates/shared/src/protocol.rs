use serde::{Deserialize, Serialize};

use crate::domain::StudentId;

pub const STUDENTS_PATH: &str = "/api/students";

pub fn student_path(id: StudentId) -> String {
    format!("{STUDENTS_PATH}/{}", id.0)
}

/// Body of `POST /api/students`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    pub full_name: String,
    pub email: String,
    pub major: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_form_field_names() {
        let request = StudentRequest {
            full_name: "Jane".into(),
            email: "jane@example.com".into(),
            major: "CS".into(),
        };
        let json = serde_json::to_string(&request).expect("serialize");
        assert_eq!(
            json,
            r#"{"fullName":"Jane","email":"jane@example.com","major":"CS"}"#
        );
    }

    #[test]
    fn student_path_embeds_id() {
        assert_eq!(student_path(StudentId(42)), "/api/students/42");
    }
}
