use crate::model::{Receiver, Symbol};

/// Returns the import path of the package declaring `symbol`.
///
/// An explicit package path wins. Otherwise the path is derived from the
/// receiver type; an empty string means it could not be determined.
pub fn package_path(symbol: &Symbol) -> String {
    if !symbol.pkg_path.is_empty() {
        return symbol.pkg_path.clone();
    }
    Receiver::parse(&symbol.recv_type)
        .map(|recv| recv.package_path)
        .unwrap_or_default()
}
