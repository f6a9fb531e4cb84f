//! Base64 and URL codecs.
//!
//! Encoding always succeeds; a value that cannot be decoded becomes
//! `Unresolved` (dropped from a multi-valued input by the algebra's
//! flattening), matching the "unresolved when absent" behavior of the
//! substring functions.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::Result;
use crate::executor::Invocation;
use crate::registry::FunctionDescriptor;
use crate::resolution::Resolution;

pub(crate) const BASE64_ENCODE: FunctionDescriptor = FunctionDescriptor {
    name: "base64-encode",
    signature: "base64-encode()",
    doc: "Base64-encodes each value (standard alphabet, padded).",
    params: &[],
    apply: apply_base64_encode,
};

fn apply_base64_encode(input: Resolution, _call: &Invocation<'_>) -> Result<Resolution> {
    Ok(input.map(|value| BASE64.encode(value)))
}

pub(crate) const BASE64_DECODE: FunctionDescriptor = FunctionDescriptor {
    name: "base64-decode",
    signature: "base64-decode()",
    doc: "Base64-decodes each value; undecodable or non-UTF-8 values \
          become unresolved.",
    params: &[],
    apply: apply_base64_decode,
};

fn apply_base64_decode(input: Resolution, _call: &Invocation<'_>) -> Result<Resolution> {
    Ok(input.on_resolved(|value| match BASE64.decode(value) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(decoded) => Resolution::single(decoded),
            Err(_) => Resolution::Unresolved,
        },
        Err(_) => Resolution::Unresolved,
    }))
}

pub(crate) const URL_ENCODE: FunctionDescriptor = FunctionDescriptor {
    name: "url-encode",
    signature: "url-encode()",
    doc: "Percent-encodes each value.",
    params: &[],
    apply: apply_url_encode,
};

fn apply_url_encode(input: Resolution, _call: &Invocation<'_>) -> Result<Resolution> {
    Ok(input.map(|value| urlencoding::encode(value).into_owned()))
}

pub(crate) const URL_DECODE: FunctionDescriptor = FunctionDescriptor {
    name: "url-decode",
    signature: "url-decode()",
    doc: "Percent-decodes each value; undecodable values become unresolved.",
    params: &[],
    apply: apply_url_decode,
};

fn apply_url_decode(input: Resolution, _call: &Invocation<'_>) -> Result<Resolution> {
    Ok(input.on_resolved(|value| match urlencoding::decode(value) {
        Ok(decoded) => Resolution::single(decoded.into_owned()),
        Err(_) => Resolution::Unresolved,
    }))
}
