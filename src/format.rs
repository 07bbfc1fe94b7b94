//! Wire Format Reference
//!
//! This module documents the `pb` parameter format as implemented by this
//! library.
//!
//! # Overview
//!
//! The `pb` query parameter carries a protocol-buffer-like message as plain
//! text. Instead of length-prefixed bytes, the message is flattened into a
//! stream of tokens separated by `!`, and nesting is expressed by token
//! counts.
//!
//! # Tokens
//!
//! ## Scalars
//!
//! ```text
//! <tag><type><payload>
//! ```
//!
//! - `<tag>`: one or more ASCII digits, the field number
//! - `<type>`: exactly one character from the table below
//! - `<payload>`: everything after the type character, up to the next `!`
//!
//! | Char | Meaning | Example |
//! |------|---------|---------|
//! | `b` | Boolean (`1` / `0`) | `16b1` |
//! | `d` | Double | `3d44.4268` |
//! | `e` | Enum | `7e81` |
//! | `f` | Float | `2f1.5` |
//! | `i` | Integer | `4i500` |
//! | `s` | String | `1sHello` |
//! | `u` | Unsigned | `3u7` |
//! | `v` | Varint | `5v12` |
//! | `x`, `y`, `z` | Opaque | `9zAbC` |
//!
//! The payload is never interpreted: `3d44.4268` decodes to a double scalar
//! with payload `"44.4268"` and encodes back to exactly the same token.
//!
//! ## Messages
//!
//! ```text
//! <tag>m<count>
//! ```
//!
//! The header is followed by exactly `<count>` tokens that make up the
//! message. `<count>` counts **every** token of the flattened content,
//! including the headers and contents of messages nested inside it:
//!
//! ```text
//! !1m3!2m1!3i1!4b0
//! ```
//!
//! Here `1m3` owns the next three tokens (`2m1`, `3i1`, `4b0`), and `2m1`
//! in turn owns `3i1`, so message 1 holds message 2 and field 4.
//!
//! An empty message is a lone header, `5m0`.
//!
//! # Separators
//!
//! - A wire string produced by the encoder starts with `!` and has a single
//!   `!` between tokens
//! - The decoder drops empty segments, so `!!1i1!` and `1i1` are equivalent
//!
//! # Repeated Fields
//!
//! A tag may appear more than once at the same level:
//!
//! ```text
//! !20m2!1e3!1e6
//! ```
//!
//! Decoded documents keep the first occurrence under the plain tag and later
//! ones under `<tag>_<n>`:
//!
//! ```text
//! 20 -> { 1 -> "e3", 1_1 -> "e6" }
//! ```
//!
//! `<n>` starts at 1 and is shared by all repeated tags of one level, so
//! `1i1!1i2!2i3!2i4` yields `1`, `1_1`, `2`, `2_2`. The suffix is dropped on
//! encode.
//!
//! # Repeated-Field Groups
//!
//! With [`ListDetection::Contiguous`](crate::ListDetection), a message whose
//! keys are exactly `"0"`, `"1"`, … `"n-1"` is not written with a header.
//! Each item is written under the parent's tag instead:
//!
//! ```text
//! { 3 -> { 0 -> "i1", 1 -> "i2" } }   =>   !3i1!3i2
//! ```
//!
//! The group contributes only its items to the enclosing count. Decoding
//! such output produces `3` and `3_1`, not the `"0".."n-1"` group.
//!
//! # Errors
//!
//! | Input | Error |
//! |-------|-------|
//! | `!xyz` | [`UnknownToken`](crate::Error::UnknownToken) |
//! | `!1q5` | [`UnknownToken`](crate::Error::UnknownToken) |
//! | `!1m5!2i1` | [`Truncated`](crate::Error::Truncated) |
//! | nesting deeper than `max_depth` | [`DepthLimit`](crate::Error::DepthLimit) |

// This module contains only documentation; no implementation code
