use std::sync::Arc;

use crate::{
    Error, LookupResult, Object, PARAMETER_SLOT, PrimitiveFunction, Result,
    Selector,
};

/// How an object produces its value, in precedence order.
#[derive(Debug, Clone)]
pub enum Evaluation {
    /// Send each message to a fresh copy, yielding the last result.
    Script(Vec<Arc<str>>),
    /// Call the native function with a copy.
    Native(PrimitiveFunction),
    /// Yield a copy carrying the same payload.
    Value,
    /// Yield the receiver itself.
    Plain,
}

impl Object {
    pub fn evaluation(&self) -> Evaluation {
        let data = self.data().read();
        if !data.messages.is_empty() {
            Evaluation::Script(data.messages.clone())
        } else if let Some(function) = &data.primitive_function {
            Evaluation::Native(function.clone())
        } else if data.primitive_value.is_some() {
            Evaluation::Value
        } else {
            Evaluation::Plain
        }
    }

    pub fn evaluate(&self) -> Result<Object> {
        match self.evaluation() {
            Evaluation::Script(messages) => {
                let receiver = self.copy();
                log::trace!(
                    "#{}: running {} message(s) on #{}",
                    self.id().as_u64(),
                    messages.len(),
                    receiver.id().as_u64()
                );
                // messages is never empty here
                let mut result = receiver.clone();
                for message in &messages {
                    result = receiver.send_message(message)?;
                }
                Ok(result)
            }
            Evaluation::Native(function) => {
                log::trace!("#{}: calling primitive", self.id().as_u64());
                function.call(self.copy())
            }
            Evaluation::Value => Ok(self.copy()),
            Evaluation::Plain => Ok(self.clone()),
        }
    }

    pub fn send_message(&self, name: &str) -> Result<Object> {
        log::trace!("send '{}' to #{}", name, self.id().as_u64());
        self.resolve(name)?.evaluate()
    }

    /// Like [`Object::send_message`], but evaluates a copy of the resolved
    /// object with `parameter` bound to its `parameter` slot.
    pub fn send_message_with_parameters(
        &self,
        name: &str,
        parameter: Object,
    ) -> Result<Object> {
        log::trace!(
            "send '{}' with #{} to #{}",
            name,
            parameter.id().as_u64(),
            self.id().as_u64()
        );
        let target = self.resolve(name)?.copy();
        target.assign_slot(PARAMETER_SLOT, parameter);
        target.evaluate()
    }

    fn resolve(&self, name: &str) -> Result<Object> {
        match Selector::new(name).lookup_object(self) {
            LookupResult::Found { target, .. } => Ok(target),
            LookupResult::None => Err(Error::MessageNotFound(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::{
        ObjectCreateInfo, PrimitiveValue, SlotTable, parameter, slots,
    };

    #[test]
    fn script_returns_last_result() {
        let object = Object::with_messages(
            ["first", "say"],
            slots([
                ("first", Object::with_value(1)),
                ("say", Object::with_value("hi")),
            ]),
        );

        let result = object.evaluate().unwrap();
        assert_eq!(result.to_string(), "hi");
    }

    #[test]
    fn messages_take_precedence_over_value() {
        let object = Object::new(ObjectCreateInfo {
            slots: slots([("x", Object::with_value("from x"))]),
            messages: vec!["x".into()],
            primitive_value: Some(5.into()),
            ..Default::default()
        });

        let result = object.evaluate().unwrap();
        assert_eq!(
            result.primitive_value(),
            Some(PrimitiveValue::from("from x"))
        );
    }

    #[test]
    fn function_takes_precedence_over_value() {
        let object = Object::new(ObjectCreateInfo {
            primitive_value: Some(5.into()),
            primitive_function: Some(PrimitiveFunction::new(|_| {
                Ok(Object::with_value("native"))
            })),
            ..Default::default()
        });

        assert!(matches!(object.evaluation(), Evaluation::Native(_)));
        assert_eq!(object.evaluate().unwrap().to_string(), "native");
    }

    #[test]
    fn value_evaluates_to_copy() {
        let object = Object::with_value(5);
        let result = object.evaluate().unwrap();

        assert!(!result.ptr_eq(&object));
        assert_eq!(result.primitive_value(), Some(PrimitiveValue::Integer(5)));
    }

    #[test]
    fn plain_evaluates_to_itself() {
        let object = Object::empty();
        assert!(matches!(object.evaluation(), Evaluation::Plain));
        assert!(object.evaluate().unwrap().ptr_eq(&object));
    }

    #[test]
    fn primitive_receives_copy() {
        let object = Object::with_function(|receiver| {
            receiver.assign_slot("scratch", Object::empty());
            Ok(receiver)
        });

        let result = object.evaluate().unwrap();
        assert!(!result.ptr_eq(&object));
        assert!(result.slot("scratch").is_some());
        assert!(object.slot("scratch").is_none());
    }

    #[test]
    fn script_sends_each_message_in_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));

        let log = calls.clone();
        let first = Object::with_function(move |_| {
            log.lock().push("first");
            Ok(Object::with_value(1))
        });
        let log = calls.clone();
        let second = Object::with_function(move |_| {
            log.lock().push("second");
            Ok(Object::with_value(2))
        });

        let object = Object::with_messages(
            ["first", "second", "first"],
            slots([("first", first), ("second", second)]),
        );

        let result = object.evaluate().unwrap();
        assert_eq!(result.primitive_value(), Some(PrimitiveValue::Integer(1)));
        assert_eq!(*calls.lock(), ["first", "second", "first"]);
    }

    #[test]
    fn script_failure_propagates() {
        let object = Object::with_messages(["missing"], SlotTable::new());
        assert_eq!(
            object.evaluate().unwrap_err(),
            Error::MessageNotFound("missing".into())
        );
    }

    #[test]
    fn send_message_evaluates_target() {
        let object = Object::new(ObjectCreateInfo {
            slots: slots([("name", Object::with_value("Alice"))]),
            ..Default::default()
        });
        assert_eq!(object.send_message("name").unwrap().to_string(), "Alice");
    }

    #[test]
    fn send_message_through_parent() {
        let parent = Object::new(ObjectCreateInfo {
            slots: slots([("color", Object::with_value("blue"))]),
            ..Default::default()
        });
        let child = Object::empty();
        child.assign_slot("p", parent);
        child.make_parent("p").unwrap();

        assert_eq!(child.send_message("color").unwrap().to_string(), "blue");
    }

    #[test]
    fn missing_message_between_mutual_parents() {
        let a = Object::empty();
        let b = Object::empty();
        a.assign_parent_slot("b", b.clone()).unwrap();
        b.assign_parent_slot("a", a.clone()).unwrap();

        assert_eq!(
            a.send_message("missing").unwrap_err(),
            Error::MessageNotFound("missing".into())
        );
    }

    #[test]
    fn parameters_reach_primitive() {
        let echo = Object::with_function(|receiver| parameter(&receiver));
        let object = Object::new(ObjectCreateInfo {
            slots: slots([("echo", echo.clone())]),
            ..Default::default()
        });
        let argument = Object::with_value("Hello");

        let result = object
            .send_message_with_parameters("echo", argument.clone())
            .unwrap();
        assert!(result.ptr_eq(&argument));
        assert_eq!(result.to_string(), "Hello");
        // the resolved slot itself is left untouched
        assert!(echo.slot(PARAMETER_SLOT).is_none());
    }

    #[test]
    fn parameters_on_missing_message() {
        let object = Object::empty();
        assert_eq!(
            object
                .send_message_with_parameters("echo", Object::empty())
                .unwrap_err(),
            Error::MessageNotFound("echo".into())
        );
    }

    #[test]
    fn parameters_visible_to_script() {
        let object = Object::new(ObjectCreateInfo {
            slots: slots([(
                "identity",
                Object::with_messages(["parameter"], SlotTable::new()),
            )]),
            ..Default::default()
        });

        let result = object
            .send_message_with_parameters("identity", Object::with_value(9))
            .unwrap();
        assert_eq!(result.primitive_value(), Some(PrimitiveValue::Integer(9)));
    }

    #[test]
    fn primitive_may_send_messages() {
        let adder = Object::with_function(|receiver| {
            let lhs = receiver.send_message("base")?;
            let rhs = parameter(&receiver)?;
            match (lhs.primitive_value(), rhs.primitive_value()) {
                (
                    Some(PrimitiveValue::Integer(lhs)),
                    Some(PrimitiveValue::Integer(rhs)),
                ) => Ok(Object::with_value(lhs + rhs)),
                _ => Ok(Object::empty()),
            }
        });
        let traits = Object::new(ObjectCreateInfo {
            slots: slots([("add", adder)]),
            ..Default::default()
        });
        let number = Object::new(ObjectCreateInfo {
            slots: slots([("base", Object::with_value(40))]),
            ..Default::default()
        });
        number.assign_parent_slot("traits", traits).unwrap();
        // the native sees its own copy, so "base" has to be reachable from it
        let adder = number.lookup("add").target().unwrap();
        adder.assign_parent_slot("number", number.clone()).unwrap();

        let result = number
            .send_message_with_parameters("add", Object::with_value(2))
            .unwrap();
        assert_eq!(result.primitive_value(), Some(PrimitiveValue::Integer(42)));
    }
}
