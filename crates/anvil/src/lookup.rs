//! The shared lookup façade.
//!
//! An object's fields expose the same lookup interface as the module's
//! top-level namespace. Rather than duplicate `get`/`get_string`/… twice,
//! both [`Object`](crate::value::Object) and
//! [`Module`](crate::module::Module) implement this one trait and get every
//! typed accessor for free via its default methods.

use crate::error::AccessError;
use crate::value::Value;

pub trait Lookup {
    /// Raw lookup, never fails.
    fn try_get(&self, key: &str) -> Option<&Value>;

    /// All keys, in insertion order.
    fn keys(&self) -> Vec<&str>;

    /// Name used in `NoSuchKey`'s `context` field.
    fn context_name(&self) -> String;

    fn contains(&self, key: &str) -> bool {
        self.try_get(key).is_some()
    }

    fn get(&self, key: &str) -> Result<&Value, AccessError> {
        self.try_get(key).ok_or_else(|| AccessError::NoSuchKey {
            context: self.context_name(),
            key: key.to_string(),
        })
    }

    fn get_string(&self, key: &str) -> Result<&str, AccessError> {
        self.get(key)?.as_string()
    }

    fn get_long(&self, key: &str) -> Result<i64, AccessError> {
        self.get(key)?.as_long()
    }

    fn get_double(&self, key: &str) -> Result<f64, AccessError> {
        self.get(key)?.as_double()
    }

    fn get_boolean(&self, key: &str) -> Result<bool, AccessError> {
        self.get(key)?.as_boolean()
    }

    fn get_array(&self, key: &str) -> Result<&[Value], AccessError> {
        self.get(key)?.as_array()
    }

    fn get_tuple(&self, key: &str) -> Result<&[Value], AccessError> {
        self.get(key)?.as_tuple()
    }

    fn get_object(&self, key: &str) -> Result<&crate::value::Object, AccessError> {
        self.get(key)?.as_object()
    }

    fn get_blob(&self, key: &str) -> Result<&crate::value::Blob, AccessError> {
        self.get(key)?.as_blob()
    }
}
