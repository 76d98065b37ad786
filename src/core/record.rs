use super::value::Value;
use std::{collections::HashMap, fmt};

/// Declared INFO value type from a `##INFO` header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoType {
    Integer,
    Float,
    String,
    Flag,
    Character,
    Unknown,
}

impl InfoType {
    pub fn from_header(type_name: &str) -> Self {
        match type_name {
            "Integer" => InfoType::Integer,
            "Float" => InfoType::Float,
            "String" => InfoType::String,
            "Flag" => InfoType::Flag,
            "Character" => InfoType::Character,
            _ => InfoType::Unknown,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, InfoType::Integer | InfoType::Float)
    }
}

impl fmt::Display for InfoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfoType::Integer => write!(f, "Integer"),
            InfoType::Float => write!(f, "Float"),
            InfoType::String => write!(f, "String"),
            InfoType::Flag => write!(f, "Flag"),
            InfoType::Character => write!(f, "Character"),
            InfoType::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoDefinition {
    pub id: String,
    pub number: String,
    pub info_type: InfoType,
    pub description: String,
}

/// INFO declarations of a VCF header, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderDescriptor {
    definitions: Vec<InfoDefinition>,
    index: HashMap<String, usize>,
}

impl HeaderDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_info(mut self, id: &str, number: &str, type_name: &str, description: &str) -> Self {
        self.insert(InfoDefinition {
            id: id.to_string(),
            number: number.to_string(),
            info_type: InfoType::from_header(type_name),
            description: unquote(description).to_string(),
        });
        self
    }

    pub fn insert(&mut self, definition: InfoDefinition) {
        match self.index.get(&definition.id) {
            Some(&idx) => self.definitions[idx] = definition,
            None => {
                self.index
                    .insert(definition.id.clone(), self.definitions.len());
                self.definitions.push(definition);
            }
        }
    }

    pub fn definition(&self, key: &str) -> Option<&InfoDefinition> {
        self.index.get(key).map(|&idx| &self.definitions[idx])
    }

    pub fn field_type(&self, key: &str) -> InfoType {
        self.definition(key)
            .map_or(InfoType::Unknown, |def| def.info_type)
    }

    pub fn description(&self, key: &str) -> &str {
        self.definition(key).map_or("", |def| def.description.as_str())
    }

    /// Single-valued (`Number=1`) numeric keys can be stored as numbers.
    pub fn is_scalar_numeric(&self, key: &str) -> bool {
        self.definition(key)
            .is_some_and(|def| def.info_type.is_numeric() && def.number == "1")
    }

    /// Integer and Float keys with their declared type.
    pub fn numeric_keys(&self) -> impl Iterator<Item = (&str, InfoType)> + '_ {
        self.definitions
            .iter()
            .filter(|def| def.info_type.is_numeric())
            .map(|def| (def.id.as_str(), def.info_type))
    }

    pub fn definitions(&self) -> &[InfoDefinition] {
        &self.definitions
    }
}

pub(crate) fn unquote(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// One VCF record with typed INFO values.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub chrom: String,
    /// 1-based.
    pub pos: i64,
    pub reference: String,
    pub alt: Vec<String>,
    pub id: Option<String>,
    pub qual: Option<f64>,
    /// Failed filters; passing records have none.
    pub filter: Option<String>,
    /// Present INFO values; flags are `Value::Flag(true)`.
    pub info: HashMap<String, Value>,
    pub info_order: Vec<String>,
}

impl VariantRecord {
    pub fn new(chrom: &str, pos: i64, reference: &str, alt: &[&str]) -> Self {
        VariantRecord {
            chrom: chrom.to_string(),
            pos,
            reference: reference.to_string(),
            alt: alt.iter().map(|a| a.to_string()).collect(),
            id: None,
            qual: None,
            filter: None,
            info: HashMap::new(),
            info_order: Vec::new(),
        }
    }

    pub fn with_info(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert_info(key, value.into());
        self
    }

    pub fn insert_info(&mut self, key: &str, value: Value) {
        if self.info.insert(key.to_string(), value).is_none() {
            self.info_order.push(key.to_string());
        }
    }

    pub fn joined_alt(&self) -> String {
        self.alt.join(",")
    }

    pub fn key(&self) -> VariantKey {
        VariantKey {
            chrom: self.chrom.clone(),
            pos: self.pos,
            reference: self.reference.clone(),
            alt: self.joined_alt(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantKey {
    pub chrom: String,
    pub pos: i64,
    pub reference: String,
    pub alt: String,
}

impl VariantKey {
    pub fn new(chrom: &str, pos: i64, reference: &str, alt: &str) -> Self {
        VariantKey {
            chrom: chrom.to_string(),
            pos,
            reference: reference.to_string(),
            alt: alt.to_string(),
        }
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}>{}", self.chrom, self.pos, self.reference, self.alt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_descriptor_lookup() {
        let header = HeaderDescriptor::new()
            .with_info("AF", "A", "Float", "\"Allele Frequency\"")
            .with_info("DP", "1", "Integer", "Depth")
            .with_info("HOM", "0", "Flag", "Homozygous");

        assert_eq!(header.field_type("AF"), InfoType::Float);
        assert_eq!(header.field_type("HOM"), InfoType::Flag);
        assert_eq!(header.field_type("MISSING"), InfoType::Unknown);
        assert_eq!(header.description("AF"), "Allele Frequency");
        assert_eq!(header.description("MISSING"), "");
        assert!(header.is_scalar_numeric("DP"));
        assert!(!header.is_scalar_numeric("AF"));
        assert_eq!(
            header.numeric_keys().collect::<Vec<_>>(),
            vec![("AF", InfoType::Float), ("DP", InfoType::Integer)]
        );
    }

    #[test]
    fn test_redeclared_info_replaces_definition() {
        let header = HeaderDescriptor::new()
            .with_info("X", "1", "Integer", "first")
            .with_info("X", "1", "String", "second");
        assert_eq!(header.definitions().len(), 1);
        assert_eq!(header.field_type("X"), InfoType::String);
    }

    #[test]
    fn test_record_info_order_and_key() {
        let record = VariantRecord::new("1", 100, "A", &["G", "T"])
            .with_info("DP", 10i64)
            .with_info("HOM", true)
            .with_info("DP", 12i64);
        assert_eq!(record.info_order, vec!["DP", "HOM"]);
        assert_eq!(record.info["DP"], Value::Integer(12));
        assert_eq!(record.key(), VariantKey::new("1", 100, "A", "G,T"));
        assert_eq!(record.key().to_string(), "1:100:A>G,T");
    }
}
