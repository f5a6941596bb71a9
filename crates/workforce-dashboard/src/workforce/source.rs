use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const ACTIVE_STATUS: &str = "active";

/// One roster entry as delivered by the HR export. Either block may be
/// missing; a record with neither block active never reaches the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub employees: Option<PersonBlock>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub externals: Option<PersonBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonBlock {
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub job_type: Option<JobType>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub firstname: String,
    #[serde(default, deserialize_with = "lenient")]
    pub lastname: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub workforce_utilisation: Option<UtilisationBlock>,
}

impl PersonBlock {
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some(ACTIVE_STATUS)
    }

    pub fn is_external(&self) -> bool {
        self.job_type == Some(JobType::External)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Internal,
    External,
    #[serde(other)]
    Unknown,
}

/// Utilisation and cost metrics. Every figure arrives as text and is only
/// interpreted during normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilisationBlock {
    #[serde(default, deserialize_with = "metric_text")]
    pub utilisation_rate_last_twelve_months: Option<String>,
    #[serde(default, deserialize_with = "metric_text")]
    pub utilisation_rate_year_to_date: Option<String>,
    #[serde(default, deserialize_with = "metric_text")]
    pub monthly_cost_difference: Option<String>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub last_three_months_individually: Vec<MonthlyUtilisation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyUtilisation {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub month: String,
    #[serde(default, deserialize_with = "metric_text")]
    pub utilisation_rate: Option<String>,
}

/// The person a record resolves to, tagged with the block it was taken from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RosterPerson<'a> {
    Employee(&'a PersonBlock),
    External(&'a PersonBlock),
}

impl<'a> RosterPerson<'a> {
    pub fn block(&self) -> &'a PersonBlock {
        match *self {
            RosterPerson::Employee(block) | RosterPerson::External(block) => block,
        }
    }
}

/// Which block becomes the row's person once a record passes the status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PersonPrecedence {
    /// `employees` whenever it is present, even if only `externals` is active.
    #[default]
    EmployeesFirst,
    /// The block whose status is active, `employees` winning a tie.
    ActiveBlock,
}

impl PersonPrecedence {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "employees-first" | "employees_first" => Some(Self::EmployeesFirst),
            "active-block" | "active_block" => Some(Self::ActiveBlock),
            _ => None,
        }
    }
}

impl SourceRecord {
    pub fn employee(block: PersonBlock) -> Self {
        Self {
            employees: Some(block),
            externals: None,
        }
    }

    pub fn external(block: PersonBlock) -> Self {
        Self {
            employees: None,
            externals: Some(block),
        }
    }

    pub fn is_active(&self) -> bool {
        let employee_active = self.employees.as_ref().is_some_and(PersonBlock::is_active);
        let external_active = self.externals.as_ref().is_some_and(PersonBlock::is_active);
        employee_active || external_active
    }

    /// Resolves the active person, or `None` when the record is filtered out.
    pub fn active_person(&self, precedence: PersonPrecedence) -> Option<RosterPerson<'_>> {
        if !self.is_active() {
            return None;
        }

        match precedence {
            PersonPrecedence::EmployeesFirst => self.employees_first(),
            PersonPrecedence::ActiveBlock => {
                match (self.employees.as_ref(), self.externals.as_ref()) {
                    (Some(employee), _) if employee.is_active() => {
                        Some(RosterPerson::Employee(employee))
                    }
                    (_, Some(external)) if external.is_active() => {
                        Some(RosterPerson::External(external))
                    }
                    _ => self.employees_first(),
                }
            }
        }
    }

    fn employees_first(&self) -> Option<RosterPerson<'_>> {
        self.employees
            .as_ref()
            .map(RosterPerson::Employee)
            .or_else(|| self.externals.as_ref().map(RosterPerson::External))
    }
}

/// Text or a number rendered as text. Any other JSON value counts as absent.
fn metric_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

/// A value of the wrong shape degrades to `None` instead of failing the roster.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Keeps the entries that decode and skips the rest, preserving order.
fn lenient_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
