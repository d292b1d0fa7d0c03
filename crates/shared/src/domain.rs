use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::UnknownFieldError, protocol::StudentRequest};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(StudentId);

/// A student record as the server stores it. The id is assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub full_name: String,
    pub email: String,
    pub major: String,
}

/// Sorts a collection ascending by id. Ids are unique, so no tie-break is needed.
pub fn sort_by_id(students: &mut [Student]) {
    students.sort_by_key(|student| student.id);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    FullName,
    Email,
    Major,
}

impl DraftField {
    pub const ALL: [DraftField; 3] = [DraftField::FullName, DraftField::Email, DraftField::Major];

    /// Form field name, matching the JSON key.
    pub fn name(self) -> &'static str {
        match self {
            DraftField::FullName => "fullName",
            DraftField::Email => "email",
            DraftField::Major => "major",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DraftField::FullName => "Full name",
            DraftField::Email => "Email",
            DraftField::Major => "Major",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DraftField {
    type Err = UnknownFieldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "fullName" | "full_name" | "name" => Ok(DraftField::FullName),
            "email" => Ok(DraftField::Email),
            "major" => Ok(DraftField::Major),
            other => Err(UnknownFieldError::new(other)),
        }
    }
}

/// Unsubmitted new-student form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub full_name: String,
    pub email: String,
    pub major: String,
}

impl Draft {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::FullName => &self.full_name,
            DraftField::Email => &self.email,
            DraftField::Major => &self.major,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::FullName => self.full_name = value,
            DraftField::Email => self.email = value,
            DraftField::Major => self.major = value,
        }
    }

    /// Fields that are empty once surrounding whitespace is ignored.
    pub fn missing_fields(&self) -> Vec<DraftField> {
        DraftField::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Request body carrying the fields exactly as typed.
    pub fn to_request(&self) -> StudentRequest {
        StudentRequest {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            major: self.major.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: i64, name: &str) -> Student {
        Student {
            id: StudentId(id),
            full_name: name.into(),
            email: format!("{}@example.com", name.to_ascii_lowercase()),
            major: "CS".into(),
        }
    }

    #[test]
    fn student_uses_camel_case_on_the_wire() {
        let json = serde_json::to_value(student(7, "Jane")).expect("serialize");
        assert_eq!(json["id"], 7);
        assert_eq!(json["fullName"], "Jane");
        assert!(json.get("full_name").is_none());

        let parsed: Student = serde_json::from_str(
            r#"{"id":3,"fullName":"Ann Lee","email":"ann@example.com","major":"Math"}"#,
        )
        .expect("deserialize");
        assert_eq!(parsed.id, StudentId(3));
        assert_eq!(parsed.full_name, "Ann Lee");
    }

    #[test]
    fn sort_by_id_orders_ascending() {
        let mut students = vec![student(9, "C"), student(2, "A"), student(5, "B")];
        sort_by_id(&mut students);
        let ids: Vec<i64> = students.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn whitespace_only_fields_count_as_missing() {
        let mut draft = Draft::default();
        draft.set(DraftField::FullName, "A");
        draft.set(DraftField::Email, "   ");
        draft.set(DraftField::Major, "CS");
        assert_eq!(draft.missing_fields(), vec![DraftField::Email]);
        assert!(!draft.is_complete());

        draft.set(DraftField::Email, "a@example.com");
        assert!(draft.is_complete());
    }

    #[test]
    fn request_keeps_fields_as_typed() {
        let mut draft = Draft::default();
        draft.set(DraftField::FullName, "  Jane ");
        let request = draft.to_request();
        assert_eq!(request.full_name, "  Jane ");
    }

    #[test]
    fn field_names_parse_from_form_and_snake_case() {
        assert_eq!("fullName".parse::<DraftField>().ok(), Some(DraftField::FullName));
        assert_eq!("full_name".parse::<DraftField>().ok(), Some(DraftField::FullName));
        assert_eq!("major".parse::<DraftField>().ok(), Some(DraftField::Major));
        let err = "phone".parse::<DraftField>().expect_err("unknown field");
        assert_eq!(err.field, "phone");
    }
}
