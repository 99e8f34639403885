use serde::{Deserialize, Serialize};
use std::fmt;

/// A function or method node from a call graph.
///
/// Free functions carry `pkg_path`. Methods often only carry `recv_type`, a
/// `"<package-path>.<TypeName>"` string with an optional leading `*`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pkg_path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub recv_type: String,
    pub name: String,
}

impl Symbol {
    pub fn function(pkg_path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            pkg_path: pkg_path.into(),
            recv_type: String::new(),
            name: name.into(),
        }
    }

    pub fn method(recv_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            pkg_path: String::new(),
            recv_type: recv_type.into(),
            name: name.into(),
        }
    }

    pub fn receiver(&self) -> Option<Receiver> {
        Receiver::parse(&self.recv_type)
    }

    /// Name as advisories list it: `Func` or `Type.Method`.
    pub fn qualified_name(&self) -> String {
        match self.receiver() {
            Some(recv) => format!("{}.{}", recv.type_name, self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.receiver() {
            Some(recv) if recv.pointer => write!(
                f,
                "(*{}.{}).{}",
                recv.package_path, recv.type_name, self.name
            ),
            Some(recv) => write!(f, "{}.{}.{}", recv.package_path, recv.type_name, self.name),
            None if self.pkg_path.is_empty() => write!(f, "{}", self.name),
            None => write!(f, "{}.{}", self.pkg_path, self.name),
        }
    }
}

/// A parsed receiver-type descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    pub package_path: String,
    pub type_name: String,
    pub pointer: bool,
}

impl Receiver {
    /// Splits `"*a.com/b.T"` into package `a.com/b`, type `T` and the pointer flag.
    ///
    /// Type arguments of a generic receiver (`a.com/b.T[a.com/c.U]`) are dropped
    /// before splitting. Returns `None` when no package path can be recovered.
    pub fn parse(descriptor: &str) -> Option<Self> {
        let pointer = descriptor.starts_with('*');
        let s = descriptor.strip_prefix('*').unwrap_or(descriptor);
        let s = match s.find('[') {
            Some(i) => &s[..i],
            None => s,
        };

        let (package_path, type_name) = s.rsplit_once('.')?;
        if package_path.is_empty() {
            return None;
        }

        Some(Self {
            package_path: package_path.to_string(),
            type_name: type_name.to_string(),
            pointer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receiver_parse() {
        let recv = Receiver::parse("*a.com/b.T").unwrap();
        assert_eq!(recv.package_path, "a.com/b");
        assert_eq!(recv.type_name, "T");
        assert!(recv.pointer);

        let recv = Receiver::parse("gopkg.in/yaml.v2.Decoder").unwrap();
        assert_eq!(recv.package_path, "gopkg.in/yaml.v2");
        assert_eq!(recv.type_name, "Decoder");
        assert!(!recv.pointer);
    }

    #[test]
    fn test_receiver_parse_generic() {
        let recv = Receiver::parse("*a.com/b.List[a.com/c.Item]").unwrap();
        assert_eq!(recv.package_path, "a.com/b");
        assert_eq!(recv.type_name, "List");
    }

    #[test]
    fn test_receiver_parse_malformed() {
        assert_eq!(Receiver::parse(""), None);
        assert_eq!(Receiver::parse("*"), None);
        assert_eq!(Receiver::parse("T"), None);
        assert_eq!(Receiver::parse(".T"), None);
    }

    #[test]
    fn test_symbol_names() {
        let func = Symbol::function("math", "Floor");
        assert_eq!(func.qualified_name(), "Floor");
        assert_eq!(func.to_string(), "math.Floor");

        let method = Symbol::method("*a.com/b.T", "M");
        assert_eq!(method.qualified_name(), "T.M");
        assert_eq!(method.to_string(), "(*a.com/b.T).M");

        let value_method = Symbol::method("a.com/b.T", "M");
        assert_eq!(value_method.to_string(), "a.com/b.T.M");
    }

    #[test]
    fn test_symbol_deserialize_partial() {
        let sym: Symbol = serde_json::from_str(r#"{"recv_type": "a.com/b.T", "name": "M"}"#).unwrap();
        assert!(sym.pkg_path.is_empty());
        assert_eq!(sym.recv_type, "a.com/b.T");
    }
}
