use std::borrow::Cow;

use hashlink::LinkedHashMap;
use saphyr::{Scalar, Yaml};

/// Lookup of string keys in a parsed YAML mapping
pub trait MappingExt<'input> {
    fn get_key(&self, key: &'static str) -> Option<&Yaml<'input>>;
}

impl<'input> MappingExt<'input> for LinkedHashMap<Yaml<'input>, Yaml<'input>> {
    fn get_key(&self, key: &'static str) -> Option<&Yaml<'input>> {
        self.get(&Yaml::Value(Scalar::String(Cow::Borrowed(key))))
    }
}

pub trait YamlExt {
    /// String scalars only. Everything else gives `None`.
    fn to_name(&self) -> Option<String>;

    /// Text of a number or boolean scalar, which YAML did not keep as written
    /// and so cannot be used as a name without quoting.
    fn unquoted_scalar(&self) -> Option<String>;

    fn is_null_value(&self) -> bool;
}

impl YamlExt for Yaml<'_> {
    fn to_name(&self) -> Option<String> {
        match self {
            Yaml::Value(Scalar::String(s)) => Some(s.to_string()),
            _ => None,
        }
    }

    fn unquoted_scalar(&self) -> Option<String> {
        match self {
            Yaml::Value(Scalar::Integer(i)) => Some(i.to_string()),
            Yaml::Value(Scalar::FloatingPoint(f)) => Some(f.to_string()),
            Yaml::Value(Scalar::Boolean(b)) => Some(b.to_string()),
            _ => None,
        }
    }

    fn is_null_value(&self) -> bool {
        matches!(self, Yaml::Value(Scalar::Null))
    }
}
