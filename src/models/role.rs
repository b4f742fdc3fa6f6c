use serde::{Deserialize, Serialize};

/// Employee role within the sampling program.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Ambassador,
    Supervisor,
}

impl Role {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Ambassador => "ambassador",
            Role::Supervisor => "supervisor",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "ambassador" => Some(Role::Ambassador),
            "supervisor" => Some(Role::Supervisor),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::from_db_str(s.to_lowercase().as_str())
    }
}
