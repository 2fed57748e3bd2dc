//! The marker attribute and its injected declaration.
//!
//! The generator recognizes placeholder methods by the `[Utf8("...")]`
//! attribute. So that user code can reference the attribute without an
//! external dependency, a fixed declaration fragment is injected into every
//! compilation before user sources are parsed (see
//! [`crate::compilation::Compilation::compile`]). The fragment is a pure
//! constant; there is no mutable registration state.

/// Namespace the marker attribute lives in.
pub const MARKER_NAMESPACE: &str = "utf8gen";

/// Simple name of the marker attribute type.
pub const MARKER_TYPE_NAME: &str = "Utf8";

/// Fully-qualified name of the marker attribute type.
pub const MARKER_FQ_NAME: &str = "utf8gen.Utf8";

/// Unit name the injected fragment is registered under.
pub const MARKER_UNIT_NAME: &str = "Utf8Attribute.g";

/// The injected declaration itself.
///
/// Attribute matching is nominal (by resolved type symbol), so the class body
/// stays empty; the string payload is carried by the attribute argument and
/// checked through constant evaluation.
pub const MARKER_DECLARATION: &str = "\
namespace utf8gen {
    public class Utf8 {
    }
}
";
