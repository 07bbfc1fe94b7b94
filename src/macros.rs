/// Builds a [`Document`](crate::Document) from a nested literal.
///
/// Keys are string literals. A value is either a braced nested message or any
/// expression convertible into a [`Field`](crate::Field) (a
/// [`Scalar`](crate::Scalar) or a `Document`).
///
/// ```rust
/// use pb_param::{document, Scalar};
///
/// let doc = document!({
///     "1": { "1": Scalar::string("abc"), "2": Scalar::enumeration(1) },
///     "4": Scalar::int(500),
///     "5": {}
/// });
/// assert_eq!(doc.len(), 3);
/// assert!(doc.get_message("5").unwrap().is_empty());
/// ```
#[macro_export]
macro_rules! document {
    (@entries $doc:ident;) => {};

    (@entries $doc:ident; $key:literal : { $($inner:tt)* } $(, $($rest:tt)*)?) => {
        $doc.insert($key, $crate::Field::Message($crate::document!({ $($inner)* })));
        $crate::document!(@entries $doc; $($($rest)*)?);
    };

    (@entries $doc:ident; $key:literal : $value:expr $(, $($rest:tt)*)?) => {
        $doc.insert($key, $crate::Field::from($value));
        $crate::document!(@entries $doc; $($($rest)*)?);
    };

    ({}) => {
        $crate::Document::new()
    };

    ({ $($body:tt)+ }) => {{
        let mut document = $crate::Document::new();
        $crate::document!(@entries document; $($body)+);
        document
    }};
}
