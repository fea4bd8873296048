//! Record types read from the scoped data store

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::serialize_rounded;

/// Declares a closed label set decoded from a text column.
///
/// Labels outside the set decode into `Unrecognized` instead of failing,
/// so a row with an unexpected value still flows through aggregation.
macro_rules! label_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// Label outside the known set, kept verbatim
            Unrecognized(String),
        }

        impl $name {
            /// Label as stored in the backend
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $label,)+
                    Self::Unrecognized(label) => label,
                }
            }

            pub fn is_recognized(&self) -> bool {
                !matches!(self, Self::Unrecognized(_))
            }
        }

        impl From<String> for $name {
            fn from(label: String) -> Self {
                match label.as_str() {
                    $($label => Self::$variant,)+
                    _ => Self::Unrecognized(label),
                }
            }
        }

        impl From<&str> for $name {
            fn from(label: &str) -> Self {
                Self::from(label.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }
    };
}

label_enum! {
    /// Expense category
    Category {
        Food => "Food",
        Transport => "Transport",
        Shopping => "Shopping",
        Bills => "Bills",
        Entertainment => "Entertainment",
        Other => "Other",
    }
}

label_enum! {
    /// Entertainment item type (`type` column)
    EntertainmentKind {
        Game => "game",
        Movie => "movie",
        Series => "series",
    }
}

label_enum! {
    /// Entertainment progress status
    EntertainmentStatus {
        Backlog => "backlog",
        Playing => "playing",
        Watching => "watching",
        Completed => "completed",
        Watched => "watched",
    }
}

label_enum! {
    /// Kanban column of a project
    ProjectStatus {
        Idea => "idea",
        InProgress => "in_progress",
        Done => "done",
    }
}

impl Category {
    /// All recognized categories in form order
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Bills,
        Category::Entertainment,
        Category::Other,
    ];
}

impl EntertainmentStatus {
    /// Statuses counted as "in progress" on the overview
    pub const ACTIVE: [EntertainmentStatus; 2] =
        [EntertainmentStatus::Playing, EntertainmentStatus::Watching];
}

/// Named record collection (backend table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Profiles,
    Expenses,
    Todos,
    Entertainment,
    Projects,
}

impl Collection {
    /// Backend table name
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Profiles => "profiles",
            Collection::Expenses => "expenses",
            Collection::Todos => "todos",
            Collection::Entertainment => "entertainment",
            Collection::Projects => "projects",
        }
    }

    /// Column holding the owning identity (profiles are keyed by the identity itself)
    pub fn owner_field(&self) -> &'static str {
        match self {
            Collection::Profiles => "id",
            _ => "user_id",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Authenticated user on whose behalf queries are scoped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
}

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: String,
    #[serde(rename = "user_id")]
    pub owner: String,
    /// Accepts a JSON number or string; written back as a number rounded to cents
    #[serde(serialize_with = "serialize_rounded")]
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoRecord {
    pub id: String,
    #[serde(rename = "user_id")]
    pub owner: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntertainmentRecord {
    pub id: String,
    #[serde(rename = "user_id")]
    pub owner: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: EntertainmentKind,
    pub status: EntertainmentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    #[serde(rename = "user_id")]
    pub owner: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
}
