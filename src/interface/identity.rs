use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Stable identifier for a capability interface (e.g., `listener.paragraph`).
///
/// Ids stand in for type identity: two interfaces with the same id are treated
/// as the same interface by the registry cache and by native-support checks.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterfaceId(pub String);

impl InterfaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InterfaceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Semantic type of an operation parameter.
///
/// The textual form (`integer`, `list<string>`, `map<any>`, ...) is what
/// catalogs store. Names that are not recognized are kept as `Custom` so a
/// catalog can declare application types without breaking older readers.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ParamType {
    Boolean,
    Integer,
    Float,
    String,
    Any,
    List(Box<ParamType>),
    /// String-keyed mapping whose values have the given type.
    Map(Box<ParamType>),
    Custom(String),
}

impl ParamType {
    pub fn list_of(item: ParamType) -> Self {
        ParamType::List(Box::new(item))
    }

    pub fn map_of(value: ParamType) -> Self {
        ParamType::Map(Box::new(value))
    }

    /// True for key-value mapping types.
    pub fn is_mapping(&self) -> bool {
        matches!(self, ParamType::Map(_))
    }

    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if let Some(inner) = generic_argument(value, "list") {
            return ParamType::list_of(ParamType::parse(inner));
        }
        if let Some(inner) = generic_argument(value, "map") {
            return ParamType::map_of(ParamType::parse(inner));
        }
        match value {
            "boolean" | "bool" => ParamType::Boolean,
            "integer" | "int" => ParamType::Integer,
            "float" => ParamType::Float,
            "string" => ParamType::String,
            "any" => ParamType::Any,
            "list" => ParamType::list_of(ParamType::Any),
            "map" => ParamType::map_of(ParamType::Any),
            other => ParamType::Custom(other.to_string()),
        }
    }
}

fn generic_argument<'a>(value: &'a str, head: &str) -> Option<&'a str> {
    value
        .strip_prefix(head)?
        .trim_start()
        .strip_prefix('<')?
        .strip_suffix('>')
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Boolean => f.write_str("boolean"),
            ParamType::Integer => f.write_str("integer"),
            ParamType::Float => f.write_str("float"),
            ParamType::String => f.write_str("string"),
            ParamType::Any => f.write_str("any"),
            ParamType::List(item) => write!(f, "list<{item}>"),
            ParamType::Map(value) => write!(f, "map<{value}>"),
            ParamType::Custom(name) => f.write_str(name),
        }
    }
}

impl Serialize for ParamType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ParamType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}
