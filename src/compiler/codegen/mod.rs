use crate::compiler::errors::ActionError;
use crate::project::{Action, ActionKind, Argument, ArgumentKind, ExecutionType};


/// Compile one event's action sequence into a GML script body.
///
/// Single forward pass. Two pieces of running state mirror the legacy
/// drag-and-drop semantics: an open-brace counter (GM drops end-block actions
/// with no matching begin, and closes blocks the user forgot) and an
/// open-conditional counter (GM allows several else actions after one
/// question). Both counters are scoped to this one sequence and never leak
/// across events.
pub fn compile_event(actions: &[Action]) -> Result<String, ActionError> {
    let mut code = String::new();
    let mut open_braces: usize = 0;
    let mut open_ifs: usize = 0;
    let mut any_question = false;

    for (position, action) in actions.iter().enumerate() {
        let arg = |index: usize| -> Result<&Argument, ActionError> {
            action
                .arguments
                .get(index)
                .ok_or(ActionError::MissingArgument {
                    position,
                    kind: action.kind,
                    expected: index + 1,
                    found: action.arguments.len(),
                })
        };

        if action.use_apply_to && action.who_name != "self" {
            code.push_str("with (");
            code.push_str(&action.who_name);
            code.push_str(")\n");
        }

        match action.kind {
            ActionKind::Begin => {
                code.push('{');
                open_braces += 1;
            }
            ActionKind::End => {
                if open_braces > 0 {
                    code.push('}');
                    open_braces -= 1;
                }
            }
            ActionKind::Else => {
                if open_ifs > 0 {
                    code.push_str("else ");
                    open_ifs -= 1;
                }
            }
            ActionKind::Exit => code.push_str("exit;"),
            ActionKind::Repeat => {
                code.push_str("repeat (");
                code.push_str(&arg(0)?.value);
                code.push(')');
            }
            ActionKind::Variable => {
                code.push_str(&arg(0)?.value);
                code.push_str(if action.relative { " += " } else { " = " });
                code.push_str(&arg(1)?.value);
                code.push(';');
            }
            ActionKind::Code => {
                // The stray comment keeps a parse boundary the downstream
                // compiler expects between user code and the closing brace.
                code.push_str("{\n");
                code.push_str(&arg(0)?.value);
                code.push_str("\n/**/\n}");
            }
            ActionKind::Normal => {
                if action.exe_type != ExecutionType::None {
                    if action.is_question {
                        code.push_str("__if__ = ");
                        open_ifs += 1;
                        any_question = true;
                    }

                    if action.is_not {
                        code.push('!');
                    }

                    if action.relative {
                        if action.is_question {
                            code.push_str("(argument_relative = 1, ");
                        } else {
                            code.push_str("{\nargument_relative = 1;\n");
                        }
                    }

                    if action.is_question && action.exe_type == ExecutionType::Code {
                        code.push_str(&action.code_string);
                    } else {
                        code.push_str(&action.function_name);
                    }

                    if action.exe_type == ExecutionType::Function {
                        code.push('(');
                        for (i, argument) in action.arguments.iter().enumerate() {
                            if i != 0 {
                                code.push(',');
                            }
                            code.push_str(&render_argument(argument));
                        }
                        code.push(')');
                    }

                    if action.relative {
                        code.push_str(if action.is_question { ");" } else { "\n}" });
                    }

                    if action.is_question {
                        code.push_str("\nif (__if__)");
                    }
                }
            }
        }
        code.push('\n');
    }

    // Someone forgot the closing block action.
    for _ in 0..open_braces {
        code.push_str("\n}");
    }

    if any_question {
        code.insert_str(0, "var __if__ = false;\n");
    }

    Ok(code)
}

/// Render one action argument as a GML expression.
pub fn render_argument(argument: &Argument) -> String {
    let val = argument.value.as_str();

    if val.is_empty() {
        return match argument.kind {
            ArgumentKind::String => "\"\"".to_string(),
            _ => "0".to_string(),
        };
    }
    match argument.kind {
        // Treat as an existing literal if it opens with a quote.
        ArgumentKind::Both if val.starts_with('"') || val.starts_with('\'') => val.to_string(),
        ArgumentKind::Both | ArgumentKind::String => {
            let escaped = val.replace('\\', "\\\\").replace('"', "\"+'\"'+\"");
            format!("\"{escaped}\"")
        }
        ArgumentKind::Boolean => (if val != "0" { "1" } else { "0" }).to_string(),
        ArgumentKind::Menu | ArgumentKind::Color => val.to_string(),
        // TODO: resolve resource-picker arguments against the project
        // collections instead of passing the raw name through.
        ArgumentKind::Sprite
        | ArgumentKind::Sound
        | ArgumentKind::Background
        | ArgumentKind::Path
        | ArgumentKind::Script
        | ArgumentKind::Object
        | ArgumentKind::Room
        | ArgumentKind::Font
        | ArgumentKind::Timeline => val.to_string(),
    }
}
