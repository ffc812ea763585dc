//! Query parameters for Etherpad API calls
//!
//! Every value on the wire is a string. Booleans are written in lowercase
//! (`"true"` / `"false"`), which is what the Etherpad server expects.

/// A value that can be sent as an API parameter
pub trait ParamValue {
    /// Render the value the way it appears in the query string
    fn to_param(&self) -> String;
}

impl ParamValue for str {
    fn to_param(&self) -> String {
        self.to_string()
    }
}

impl ParamValue for String {
    fn to_param(&self) -> String {
        self.clone()
    }
}

impl ParamValue for bool {
    fn to_param(&self) -> String {
        String::from(if *self { "true" } else { "false" })
    }
}

impl<T: ParamValue + ?Sized> ParamValue for &T {
    fn to_param(&self) -> String {
        (**self).to_param()
    }
}

macro_rules! impl_param_value_for_int {
    ($($ty:ty),*) => {
        $(
            impl ParamValue for $ty {
                fn to_param(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_param_value_for_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

/// Ordered, string-keyed parameters for a single API call
///
/// Keys are unique: setting a key twice replaces the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter (builder pattern)
    pub fn with(mut self, key: impl Into<String>, value: impl ParamValue) -> Self {
        self.set(key, value);
        self
    }

    /// Set a parameter only when a value is present (builder pattern)
    pub fn with_opt<V: ParamValue>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Set a parameter, replacing any existing value for the key
    pub fn set(&mut self, key: impl Into<String>, value: impl ParamValue) {
        let key = key.into();
        let value = value.to_param();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Parameter names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, String)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: ParamValue> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}
