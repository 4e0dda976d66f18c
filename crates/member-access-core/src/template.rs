// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Named-placeholder formatting over reflected values.
//!
//! `{Name}` is replaced by the property `Name` of the source; `{A.B.C}`
//! walks nested properties. Names resolve like
//! [`TypeAccessor::find_property`](crate::TypeAccessor::find_property), so
//! they are case-insensitive. Use `{{` and `}}` for literal braces.
//!
//! Every intermediate value on a path must carry a descriptor: declare the
//! member `#[reflect(nested)]` (or call
//! [`reflected`](crate::TypeDescriptorBuilder::reflected) on the builder).
//! The final value must be a scalar, a string or an `Option` of one; `None`
//! renders as an empty string.

use std::{any::Any, iter::Peekable, str::Chars};

use crate::{
    AccessError, Reflected, Result, TypeAccessorRegistry, TypeDescriptor, Value, ValueAccessor
};

/// Expand `template` against `source` using the global registry.
///
/// # Errors
///
/// - [`InvalidArgument`](AccessError::InvalidArgument) for an unclosed or
///   empty placeholder, or a stray `}`
/// - [`InvalidOperation`](AccessError::InvalidOperation) when a path
///   segment does not resolve or the value has no text form
pub fn format_template(template: &str, source: &dyn Reflected) -> Result<String> {
    format_template_with(TypeAccessorRegistry::global(), template, source)
}

/// Expand `template` against `source` resolving through `registry`.
///
/// # Errors
///
/// As for [`format_template`].
pub fn format_template_with(
    registry: &TypeAccessorRegistry,
    template: &str,
    source: &dyn Reflected
) -> Result<String> {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.next_if_eq(&'{').is_some() => output.push('{'),
            '}' if chars.next_if_eq(&'}').is_some() => output.push('}'),
            '{' => {
                let path = placeholder(&mut chars)?;
                output.push_str(&render(registry, source, &path)?);
            }
            '}' => return Err(AccessError::invalid_argument("unmatched `}` in template")),
            _ => output.push(c)
        }
    }
    Ok(output)
}

fn placeholder(chars: &mut Peekable<Chars<'_>>) -> Result<String> {
    let mut path = String::new();
    for c in chars.by_ref() {
        if c == '}' {
            let path = path.trim();
            if path.is_empty() {
                return Err(AccessError::invalid_argument("empty placeholder in template"));
            }
            return Ok(path.to_owned());
        }
        path.push(c);
    }
    Err(AccessError::invalid_argument(format!(
        "unclosed placeholder `{{{path}` in template"
    )))
}

fn read(
    registry: &TypeAccessorRegistry,
    descriptor: &'static TypeDescriptor,
    instance: &dyn Any,
    segment: &str,
    path: &str
) -> Result<Value> {
    registry
        .type_accessor_for(descriptor)
        .find_property(segment)?
        .ok_or_else(|| {
            AccessError::invalid_operation(format!(
                "`{segment}` in `{path}` is not a property of `{}`",
                descriptor.name()
            ))
        })?
        .get_value(Some(instance))
}

fn render(registry: &TypeAccessorRegistry, source: &dyn Reflected, path: &str) -> Result<String> {
    let mut segments = path.split('.').map(str::trim);
    let first = segments.next().unwrap_or(path);
    let mut current = read(registry, source.descriptor(), source.as_any(), first, path)?;
    for segment in segments {
        let descriptor = current.descriptor().ok_or_else(|| {
            AccessError::invalid_operation(format!(
                "cannot read `{segment}` in `{path}`: `{}` is not a reflected value",
                current.type_name()
            ))
        })?;
        current = read(registry, descriptor, current.as_any(), segment, path)?;
    }
    current.to_display_string().ok_or_else(|| {
        AccessError::invalid_operation(format!(
            "`{path}` resolves to `{}`, which has no text form",
            current.type_name()
        ))
    })
}
