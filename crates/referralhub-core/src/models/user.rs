use std::fmt;

use serde::{Deserialize, Serialize};

use crate::route::Route;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[default]
    #[serde(rename = "EMPLOYEE")]
    Employee,
    #[serde(rename = "HR")]
    Hr,
}

impl Role {
    /// Landing view for a signed in user of this role.
    pub fn default_route(self) -> Route {
        match self {
            Role::Hr => Route::Hr,
            Role::Employee => Route::Employee,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Employee => "EMPLOYEE",
            Role::Hr => "HR",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Employee => "Employee",
            Role::Hr => "HR Manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EMPLOYEE" => Ok(Role::Employee),
            "HR" => Ok(Role::Hr),
            other => Err(format!("unknown role {other}")),
        }
    }
}

/// Identity returned by `login`, `register` and `me`, and persisted next to the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Two letter avatar text for the sidebar.
pub fn user_initials(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();

    if initials.is_empty() {
        "?".to_string()
    } else {
        initials
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Hr).unwrap(), "\"HR\"");
        let role: Role = serde_json::from_str("\"EMPLOYEE\"").unwrap();
        assert_eq!(role, Role::Employee);
        assert!(serde_json::from_str::<Role>("\"ADMIN\"").is_err());
    }

    #[test]
    fn test_role_default_route() {
        assert_eq!(Role::Hr.default_route(), Route::Hr);
        assert_eq!(Role::Employee.default_route(), Route::Employee);
    }

    #[test]
    fn test_user_json_shape() {
        let user: User = serde_json::from_str(
            r#"{"id":"7","name":"Ada Lovelace","email":"ada@corp.io","role":"HR"}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Hr);
        assert_eq!(user.name, "Ada Lovelace");
    }

    #[test]
    fn test_user_initials() {
        assert_eq!(user_initials("ada lovelace byron"), "AL");
        assert_eq!(user_initials("Grace"), "G");
        assert_eq!(user_initials("  "), "?");
        assert_eq!(user_initials(""), "?");
    }
}
