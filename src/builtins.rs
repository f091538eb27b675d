/// Callee names the transpiler maps onto a JavaScript host call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFunction {
    Print,
}

impl BuiltinFunction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "print" | "println" => Some(Self::Print),
            _ => None,
        }
    }

    pub fn js_callee(self) -> &'static str {
        match self {
            Self::Print => "console.log",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_aliases_resolve_to_console_log() {
        for name in ["print", "println"] {
            let builtin = BuiltinFunction::from_name(name).expect("builtin");
            assert_eq!(builtin.js_callee(), "console.log");
        }
        assert_eq!(BuiltinFunction::from_name("printf"), None);
    }
}
