//! Naming rules shared by the generators.
//!
//! Two snake-case conversions live here and they are *not* interchangeable:
//!
//! - [`field_to_column`] only splits on a lowercase letter followed by an
//!   uppercase letter, so acronyms stay glued together (`userID` -> `user_id`,
//!   `HTTPCode` -> `httpcode`).
//! - [`entity_to_table_default`] splits before every uppercase letter after
//!   the first one (`HTTPCode` -> `h_t_t_p_code`).
//!
//! Column names and default table names are derived with different rules and
//! existing schemas depend on both outputs, so keep them separate.

use heck::ToShoutySnakeCase;

/// Convert a field name to its column name (`appleJuice` -> `apple_juice`).
pub fn field_to_column(name: &str) -> String {
    let mut column = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;

    for ch in name.chars() {
        if prev_lower && ch.is_ascii_uppercase() {
            column.push('_');
        }
        prev_lower = ch.is_ascii_lowercase();
        column.push(ch);
    }

    column.to_lowercase()
}

/// Default table name for an entity (`DynamicModel` -> `dynamic_model`).
pub fn entity_to_table_default(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut table = String::with_capacity(name.len() + 4);
    table.extend(first.to_lowercase());
    for ch in chars {
        if ch.is_uppercase() {
            table.push('_');
            table.extend(ch.to_lowercase());
        } else {
            table.push(ch);
        }
    }
    table
}

/// Instance identifier for a type name (`PersonRecord` -> `personRecord`).
pub fn to_instance_name(entity: &str) -> String {
    let mut chars = entity.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Name of the shared descriptor static for an entity (`PersonRecord` -> `PERSON_RECORD`).
pub fn to_static_name(entity: &str) -> String {
    to_instance_name(entity).to_shouty_snake_case()
}

/// Accessor stem for a field name (`firstName` -> `FirstName`).
pub fn to_accessor_name(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Getter method name for a field (`firstName` -> `getFirstName`).
pub fn getter_name(field: &str) -> String {
    format!("get{}", to_accessor_name(field))
}
