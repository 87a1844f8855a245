//! Human-readable rendering of encodable values for logs.
//!
//! Collections print at most [`PREVIEW_LIMIT`] elements: `{1, 2, 3, 4, ...}`.

use super::shape::Encodable;

/// Elements shown before a collection preview is cut short.
pub const PREVIEW_LIMIT: usize = 4;

/// Render `value` as text.
pub fn preview<T: Encodable + ?Sized>(value: &T) -> String {
    let mut out = String::new();
    value.preview(&mut out);
    out
}

pub(crate) fn preview_items<'a, T, I>(items: I, out: &mut String)
where
    T: Encodable + 'a,
    I: ExactSizeIterator<Item = &'a T>,
{
    let len = items.len();
    out.push('{');
    for (index, item) in items.enumerate() {
        if index == PREVIEW_LIMIT {
            out.push_str("...");
            break;
        }
        item.preview(out);
        if index + 1 != len {
            out.push_str(", ");
        }
    }
    out.push('}');
}
