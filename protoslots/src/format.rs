use std::fmt;

use crate::Object;

const PRIMITIVE_FUNCTION_PLACEHOLDER: &str = "<object: primitive function>";

impl Object {
    /// Diagnostic rendering.
    ///
    /// A primitive value renders as itself, a primitive function as a fixed
    /// placeholder, anything else as its message script (if any) followed
    /// by its slot names in sorted order.
    pub fn render(&self) -> String {
        let data = self.data().read();

        if let Some(value) = &data.primitive_value {
            return value.to_string();
        }
        if data.primitive_function.is_some() {
            return PRIMITIVE_FUNCTION_PLACEHOLDER.to_string();
        }

        let slot_names: Vec<&str> =
            data.slots.keys().map(|name| name.as_ref()).collect();
        if data.messages.is_empty() {
            format!("<object: slots={:?}>", slot_names)
        } else {
            let messages: Vec<&str> =
                data.messages.iter().map(|name| name.as_ref()).collect();
            format!("<object: messages={:?}, slots={:?}>", messages, slot_names)
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// slot contents are not followed, the graph may be cyclic
impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id().as_u64(), self.render())
    }
}
