//! Value model, coercions, error/control-flow signaling, and the `RegExp`/
//! `Date` value kinds for the signature-script interpreter.

mod coerce;
mod date;
mod errors;
mod heap;
mod number_format;
mod regexp;
mod scope;
mod value;

pub use coerce::{
    abstract_equals, less_than, strict_equals, string_to_number, to_boolean, to_int32,
    to_number, to_primitive, to_string, to_uint32, RelResult,
};
pub use date::{
    date_to_string, from_components, get_date, get_day, get_full_year, get_hours,
    get_milliseconds, get_minutes, get_month, get_seconds, get_timezone_offset,
    is_valid as date_is_valid, now_unavailable,
};
pub use errors::{
    cannot_read_property_of, invalid_regex, not_a_function, range_error, reference_error,
    resource_exhausted, syntax_error, type_error, ControlFlow, ErrorKind, EvalError, EvalResult,
};
pub use heap::Heap;
pub use number_format::number_to_string;
pub use regexp::{JsRegExp, RegExpFlags};
pub use scope::Scope;
pub use value::{FunctionValue, Value};
