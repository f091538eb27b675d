use anyhow::{Context, Result, bail, ensure};
use std::path::Path;

use kori::{CompileError, compile};
use test_support::{Case, CaseClass, load_cases, normalize_output};

const PROGRAMS_DIR: &str = "tests/programs";

fn class_of(error: &CompileError) -> CaseClass {
    match error {
        CompileError::Lex(_) => CaseClass::LexError,
        CompileError::Parse(_) => CaseClass::ParseError,
        CompileError::Codegen(_) => CaseClass::CodegenError,
    }
}

fn run_case(case: &Case) -> Result<()> {
    let source = case.read_program()?;
    let result = compile(source.trim());

    match case.spec.class {
        CaseClass::Success => {
            let output_file = case
                .spec
                .expected
                .output_file
                .as_deref()
                .with_context(|| format!("Missing output_file in {}", case.name))?;
            let expected = case.read_text(output_file)?;
            let output = result.with_context(|| format!("Compiling {}", case.name))?;
            assert_eq!(
                normalize_output(&output),
                normalize_output(&expected),
                "Generated JavaScript mismatch for {}",
                case.name
            );
        }
        class => {
            let expected_error = case
                .spec
                .expected
                .error_contains
                .as_deref()
                .with_context(|| format!("Missing error_contains in {}", case.name))?
                .trim();
            let error = match result {
                Ok(_) => bail!("Expected {class:?} in {}, but compilation succeeded", case.name),
                Err(error) => error,
            };
            ensure!(
                class_of(&error) == class,
                "Expected {class:?} in {}, got {:?}",
                case.name,
                class_of(&error)
            );
            let actual = error.to_string();
            ensure!(
                actual.contains(expected_error),
                "Expected error containing '{expected_error}' in {}, got '{actual}'",
                case.name
            );
        }
    }

    Ok(())
}

#[test]
fn compiles_fixture_programs() -> Result<()> {
    for case in load_cases(Path::new(PROGRAMS_DIR))? {
        run_case(&case)?;
    }
    Ok(())
}

#[test]
fn success_output_is_stable_across_runs() -> Result<()> {
    for case in load_cases(Path::new(PROGRAMS_DIR))? {
        if case.spec.class != CaseClass::Success {
            continue;
        }
        let source = case.read_program()?;
        let first = compile(source.trim()).with_context(|| format!("Compiling {}", case.name))?;
        let second = compile(source.trim()).with_context(|| format!("Compiling {}", case.name))?;
        assert_eq!(first, second, "Output of {} is not deterministic", case.name);
    }
    Ok(())
}

#[test]
fn codegen_errors_carry_no_position() -> Result<()> {
    for case in load_cases(Path::new(PROGRAMS_DIR))? {
        if case.spec.class != CaseClass::CodegenError {
            continue;
        }
        let source = case.read_program()?;
        match compile(source.trim()) {
            Err(CompileError::Codegen(error)) => {
                ensure!(error.line() == -1 && error.column() == -1);
                ensure!(!error.is_internal(), "{} raised an internal error", case.name);
            }
            other => bail!("Expected codegen error in {}, got {other:?}", case.name),
        }
    }
    Ok(())
}
