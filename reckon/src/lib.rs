//! The reckon app. For an overview of the expression engine, see
//! [libreckon's documentation](libreckon).

#![deny(missing_docs)]

mod diagnostics;
use diagnostics::{emit_diagnostics, sanitize_source_for_diagnostics};

use libreckon::{Diagnostic, Expression, Optimizer, Registry};

/// Options to run reckon with.
pub struct Opts {
    /// Expression to evaluate.
    pub program: String,
    /// Variable declarations of the form `name=value`. Each declares the variable and binds the
    /// value to it.
    pub vars: Vec<String>,
    /// When true, the expression is optimized and the optimized tree is printed before the
    /// expression is evaluated.
    pub optimize: bool,
    /// When true, reckon will stop after parsing the expression and print its tree.
    pub parse_only: bool,
    /// When is [Some](Option::Some) catalog, lists that catalog instead of evaluating.
    pub list: Option<String>,
    /// When is [Some](Option::Some) diagnostic code, will explain that code.
    pub explain_diagnostic: Option<String>,
    /// When true, debug logs are emitted.
    pub verbose: bool,
    /// When true, reckon emit will be colored.
    pub color: bool,
}

/// Parses [Opts](self::Opts) from the command line or given a parser that acts on the clap
/// [App](clap::App).
pub fn get_opts<P>(parser: P, color: bool) -> Result<Opts, clap::Error>
where
    P: for<'a> FnOnce(clap::App<'a, '_>) -> Result<clap::ArgMatches<'a>, clap::Error>,
{
    let app = clap::App::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .author(clap::crate_authors!())
        .arg(
            clap::Arg::with_name("program")
                .help("Expression to evaluate")
                .required_unless_one(&["explain", "list"]),
        )
        .arg(
            clap::Arg::with_name("var")
                .long("--var")
                .value_name("name=value")
                .help("Declare a variable and bind a value to it. May be repeated.")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1),
        )
        .arg(
            clap::Arg::with_name("optimize")
                .long("--optimize")
                .help("Print the optimized expression tree before evaluating"),
        )
        .arg(
            clap::Arg::with_name("parse-only")
                .long("--parse-only")
                .help("Stop after parsing and dump the expression tree"),
        )
        .arg(
            clap::Arg::with_name("list")
                .long("--list")
                .value_name("catalog")
                .help("List the registered constants, operators, functions, or variables.")
                .takes_value(true)
                .possible_values(&["constants", "operators", "functions", "variables"]),
        )
        .arg(
            clap::Arg::with_name("explain")
                .long("--explain")
                .value_name("diagnostic")
                .help("Provide a detailed explanation for a diagnostic code.")
                .takes_value(true),
        )
        .arg(
            clap::Arg::with_name("verbose")
                .short("-v")
                .long("--verbose")
                .help("Emit debug logs. RUST_LOG takes precedence."),
        );
    let matches = parser(app)?;

    Ok(Opts {
        program: matches.value_of("program").unwrap_or_default().into(),
        vars: matches
            .values_of("var")
            .map(|vars| vars.map(str::to_owned).collect())
            .unwrap_or_default(),
        optimize: matches.is_present("optimize"),
        parse_only: matches.is_present("parse-only"),
        list: matches.value_of("list").map(str::to_owned),
        explain_diagnostic: matches.value_of("explain").map(str::to_owned),
        verbose: matches.is_present("verbose"),
        color,
    })
}

/// Output of a reckon execution.
#[derive(Default, Debug)]
pub struct ReckonResult {
    /// Exit code
    pub code: i32,
    /// Emit for stdout
    pub stdout: String,
    /// Emit for stderr
    pub stderr: String,
    /// Whether the stdout should be emit as paged
    pub page: bool,
}

/// Builds a [ReckonResult](self::ReckonResult).
struct ReckonResultBuilder<'a> {
    /// Original expression source.
    program: &'a str,
    /// Expression source sanitized for diagnostic emission.
    sanitized_program: String,
    color: bool,
    stdout: Vec<String>,
    stderr: Vec<String>,
    page: bool,
}

impl<'a> ReckonResultBuilder<'a> {
    fn new(program: &'a str, color: bool) -> Self {
        Self {
            program,
            sanitized_program: sanitize_source_for_diagnostics(program),
            color,
            stdout: Vec::new(),
            stderr: Vec::new(),
            page: false,
        }
    }

    fn emit<T: ToString>(&mut self, obj: T) {
        self.stdout.push(obj.to_string());
    }

    fn err(&mut self, diagnostic: Diagnostic) {
        self.stderr.push(emit_diagnostics(
            &self.sanitized_program,
            &[diagnostic],
            self.color,
        ));
    }

    fn err_msg<T: ToString>(&mut self, msg: T) {
        self.stderr.push(format!("error: {}", msg.to_string()));
    }

    fn finish(self, code: i32) -> ReckonResult {
        ReckonResult {
            code,
            stdout: self.stdout.join("\n"),
            stderr: self.stderr.join("\n"),
            page: self.page,
        }
    }

    fn ok(self) -> ReckonResult {
        self.finish(0)
    }

    fn failed(self) -> ReckonResult {
        self.finish(1)
    }
}

/// Splits a `name=value` declaration.
fn parse_var(decl: &str) -> Result<(&str, f64), String> {
    let mut parts = decl.splitn(2, '=');
    let name = parts.next().unwrap_or_default().trim();
    let value = parts
        .next()
        .ok_or_else(|| format!("variable declaration '{}' is not of the form name=value", decl))?
        .trim();
    if name.is_empty() {
        return Err(format!("variable declaration '{}' has no name", decl));
    }
    let value = value
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a number (in declaration of '{}')", value, name))?;
    Ok((name, value))
}

/// Runs reckon end-to-end.
pub fn run_reckon(opts: Opts) -> ReckonResult {
    let mut result = ReckonResultBuilder::new(&opts.program, opts.color);

    if let Some(diag_code) = opts.explain_diagnostic {
        let codes = Diagnostic::all_codes_with_explanations();
        return match codes.get::<str>(&diag_code.to_uppercase()) {
            Some(explanation) => {
                result.emit(explanation);
                result.page = true;
                result.ok()
            }
            None => {
                result.err_msg(format!("{} is not a diagnostic code", diag_code));
                result.failed()
            }
        };
    }

    let mut registry = Registry::default();
    let mut bindings = Vec::with_capacity(opts.vars.len());
    for decl in opts.vars.iter() {
        let (name, value) = match parse_var(decl) {
            Ok(var) => var,
            Err(msg) => {
                result.err_msg(msg);
                return result.failed();
            }
        };
        if !registry.is_variable(name) && !registry.add_variable(name) {
            result.err_msg(format!(
                "cannot declare variable '{}': the name is already in use",
                name
            ));
            return result.failed();
        }
        bindings.push((name, value));
    }

    if let Some(catalog) = opts.list {
        list_catalog(&registry, &catalog, &mut result);
        return result.ok();
    }

    let expr = match registry.parse(result.program) {
        Ok(expr) => expr,
        Err(err) => {
            log::debug!("parse failed: {:?}", err);
            result.err(err.diagnostic(result.program));
            return result.failed();
        }
    };

    if opts.parse_only {
        result.emit(&expr);
        return result.ok();
    }

    let mut expr = if opts.optimize {
        let optimized = Optimizer::new().optimize(&expr);
        result.emit(&optimized);
        optimized
    } else {
        expr
    };

    evaluate(&mut expr, bindings, &mut result);
    if result.stderr.is_empty() {
        result.ok()
    } else {
        result.failed()
    }
}

fn evaluate(expr: &mut Expression, bindings: Vec<(&str, f64)>, result: &mut ReckonResultBuilder) {
    expr.set_variables(bindings);
    match expr.evaluate() {
        Ok(value) => result.emit(value),
        Err(err) => {
            log::debug!("evaluation failed: {:?}", err);
            result.err(err.diagnostic(result.program));
        }
    }
}

fn list_catalog(registry: &Registry, catalog: &str, result: &mut ReckonResultBuilder) {
    match catalog {
        "constants" => {
            for constant in registry.constants() {
                result.emit(format!("{:<8}{}", constant.name, constant.value));
            }
        }
        "variables" => {
            for variable in registry.variables() {
                result.emit(&variable.name);
            }
        }
        "operators" => {
            for op in registry.operators() {
                result.emit(format!(
                    "{:<5}{:<9}{:<4}{:<7}{}",
                    op.name,
                    op.position.to_string(),
                    op.priority,
                    op.associativity.to_string(),
                    op.description
                ));
            }
        }
        "functions" => {
            for function in registry.functions() {
                result.emit(format!(
                    "{:<12}{:<4}{}",
                    function.name,
                    function.arity.to_string(),
                    function.description
                ));
            }
        }
        _ => result.err_msg(format!("{} is not a catalog", catalog)),
    }
}
