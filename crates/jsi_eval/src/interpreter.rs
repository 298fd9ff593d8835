//! The statement/expression tree-walker and its entry points (spec 4.3/4.4,
//! §6 `build`/`call`/`extract_function`), grounded on `ori_eval::interpreter`'s
//! `Interpreter` struct shape and `ori_eval::interpreter::builder`'s fluent
//! `InterpreterBuilder` (setters returning `Self`, a final `build()`).

use std::rc::Rc;
use std::time::Instant;

use jsi_ir::{Function, Item, Name, Program, Stmt, StmtKind, StringInterner, SwitchCase};
use jsi_value::{
    resource_exhausted, strict_equals, to_boolean, type_error, ControlFlow, EvalError, EvalResult,
    FunctionValue, Value,
};

use crate::environment::Environment;
use crate::function_val;

/// Recursion/deadline/array-size budget (spec 5), configurable by the host
/// embedding this interpreter.
#[derive(Clone)]
pub struct InterpreterConfig {
    pub max_recursion_depth: u32,
    pub deadline: Option<Instant>,
    pub max_array_len: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            max_recursion_depth: 100,
            deadline: None,
            max_array_len: 1_000_000,
        }
    }
}

/// Optional statement-entry trace hook (spec 6: "debug-trace callback of
/// signature `(depth: u32, message: String)`").
pub type TraceHook = Box<dyn Fn(u32, &str)>;

pub struct InterpreterBuilder {
    config: InterpreterConfig,
    trace: Option<TraceHook>,
}

impl InterpreterBuilder {
    #[must_use]
    pub fn new() -> Self {
        InterpreterBuilder {
            config: InterpreterConfig::default(),
            trace: None,
        }
    }

    #[must_use]
    pub fn max_recursion_depth(mut self, depth: u32) -> Self {
        self.config.max_recursion_depth = depth;
        self
    }

    #[must_use]
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.config.deadline = Some(deadline);
        self
    }

    #[must_use]
    pub fn max_array_len(mut self, len: usize) -> Self {
        self.config.max_array_len = len;
        self
    }

    #[must_use]
    pub fn trace(mut self, hook: TraceHook) -> Self {
        self.trace = Some(hook);
        self
    }

    /// Parses `program_text` and registers its top-level items (function
    /// declarations, `name = expr` assignments, and bare statements, in
    /// source order) into the global scope.
    pub fn build(self, program_text: &str) -> Result<Interpreter, EvalError> {
        let mut interner = StringInterner::new();
        let (parsed, lex_errors) = jsi_parse::parse_program(program_text, &mut interner);
        if let Some(first) = lex_errors.first() {
            return Err(jsi_value::syntax_error(first.to_string(), jsi_ir::Span::DUMMY));
        }
        let program = parsed.map_err(|e| jsi_value::syntax_error(e.message, e.span))?;

        let this_name = interner.intern("this");
        let mut interp = Interpreter {
            interner,
            env: Environment::new(),
            config: self.config,
            this_name,
            call_depth: 0,
            trace: self.trace,
            program,
            source: program_text.into(),
        };
        interp.run_top_level()?;
        Ok(interp)
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Interpreter {
    pub(crate) interner: StringInterner,
    pub(crate) env: Environment,
    pub(crate) config: InterpreterConfig,
    pub(crate) this_name: Name,
    call_depth: u32,
    trace: Option<TraceHook>,
    program: Program,
    source: Rc<str>,
}

impl Interpreter {
    /// The ~100-char offending snippet a host-facing structured exception
    /// reports alongside kind/message (spec 7), sliced from the original
    /// program text by the failing expression/statement's span.
    #[must_use]
    pub fn snippet_at(&self, span: jsi_ir::Span) -> String {
        let start = span.start as usize;
        let end = (span.end as usize).min(self.source.len());
        if start >= end || start >= self.source.len() {
            return String::new();
        }
        let text = &self.source[start..end];
        const MAX_LEN: usize = 100;
        match text.char_indices().nth(MAX_LEN) {
            Some((byte_idx, _)) => format!("{}…", &text[..byte_idx]),
            None => text.to_owned(),
        }
    }
}

enum LoopSignal {
    Break,
}

impl Interpreter {
    /// Parses and registers `program_text`'s top-level items with default
    /// configuration (spec 6: `build(program_text) -> Interpreter`).
    pub fn build(program_text: &str) -> Result<Interpreter, EvalError> {
        InterpreterBuilder::new().build(program_text)
    }

    fn run_top_level(&mut self) -> Result<(), EvalError> {
        let items = self.program.items.clone();
        for item in &items {
            match item {
                Item::Function(func) => self.define_function_decl(func),
                Item::TopLevelAssign { name, value, .. } => {
                    let v = self.eval_expr(value)?;
                    self.env.define(*name, v);
                }
                Item::Statement(stmt) => self.exec_stmt(stmt)?,
            }
        }
        Ok(())
    }

    fn define_function_decl(&mut self, func: &Function) {
        let closure = function_val::make_closure(func, self.env.current_scope(), &self.interner);
        if let Some(name) = func.name {
            self.env.define(name, closure);
        }
    }

    /// Invokes the named global function with `args`, after defining every
    /// `globals` entry as a global binding (spec 6:
    /// `Interpreter.call(function_name, args, globals) -> Value`).
    pub fn call(&mut self, function_name: &str, args: &[Value], globals: &[(String, Value)]) -> EvalResult {
        for (name, value) in globals {
            let interned = self.interner.intern(name);
            self.env.define_global(interned, value.clone());
        }
        let interned_name = self.interner.intern(function_name);
        match self.env.lookup(interned_name) {
            Some(Value::Function(f)) => self.invoke(&f, args, Value::Undefined),
            Some(_) => Err(type_error(format!("'{function_name}' is not a function"))),
            None => Err(jsi_value::reference_error(function_name)),
        }
    }

    /// Returns the named global function as a reusable closure value (spec
    /// 6: `Interpreter.extract_function(name) -> Callable`), so a host can
    /// cache and re-invoke it without re-parsing the program.
    #[must_use]
    pub fn extract_function(&mut self, name: &str) -> Option<Rc<FunctionValue>> {
        let interned = self.interner.intern(name);
        match self.env.lookup(interned) {
            Some(Value::Function(f)) => Some(f),
            _ => None,
        }
    }

    pub(crate) fn invoke(&mut self, f: &Rc<FunctionValue>, args: &[Value], this: Value) -> EvalResult {
        self.call_depth += 1;
        if self.call_depth > self.config.max_recursion_depth {
            self.call_depth -= 1;
            return Err(resource_exhausted("maximum call recursion depth exceeded"));
        }
        self.check_deadline().map_err(|e| {
            self.call_depth -= 1;
            e
        })?;
        tracing::debug!(
            depth = self.call_depth,
            name = f.name.as_deref().unwrap_or("<anonymous>"),
            args = args.len(),
            "call"
        );
        if let Some(trace) = &self.trace {
            trace(
                self.call_depth,
                &format!("call {}", f.name.as_deref().unwrap_or("<anonymous>")),
            );
        }

        self.env.push_scope_over(&f.closure);
        function_val::bind_params(&self.env.current_scope(), &f.params, args);
        self.env.define(self.this_name, this);
        let body = f.body.clone();
        let result = self.exec_stmts(&body);
        self.env.pop_scope();
        self.call_depth -= 1;

        match result {
            Ok(()) => Ok(Value::Undefined),
            Err(e) => match e.control_flow {
                Some(ControlFlow::Return(v)) => Ok(v),
                _ => Err(e),
            },
        }
    }

    fn check_deadline(&self) -> Result<(), EvalError> {
        if let Some(deadline) = self.config.deadline {
            if Instant::now() > deadline {
                return Err(resource_exhausted("execution deadline exceeded"));
            }
        }
        Ok(())
    }

    pub(crate) fn exec_stmts(&mut self, stmts: &[Stmt]) -> Result<(), EvalError> {
        for stmt in stmts {
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<(), EvalError> {
        self.exec_stmt_labeled(stmt, None)
    }

    fn exec_stmt_labeled(&mut self, stmt: &Stmt, own_label: Option<Name>) -> Result<(), EvalError> {
        self.check_deadline()?;
        tracing::trace!(
            depth = self.call_depth,
            span_start = stmt.span.start,
            span_end = stmt.span.end,
            "exec stmt"
        );
        match &stmt.kind {
            StmtKind::Labeled { label, body } => match self.exec_stmt_labeled(body, Some(*label)) {
                Err(e) => match &e.control_flow {
                    Some(ControlFlow::Break(Some(l))) if *l == *label => Ok(()),
                    _ => Err(e),
                },
                ok => ok,
            },
            StmtKind::While { test, body } => self.exec_while(test, body, own_label),
            StmtKind::DoWhile { body, test } => self.exec_do_while(body, test, own_label),
            StmtKind::For {
                init,
                test,
                update,
                body,
            } => self.exec_for(init, test, update, body, own_label),
            StmtKind::ForIn {
                declares,
                binding,
                object,
                body,
            } => self.exec_for_in(*declares, *binding, object, body, own_label),
            StmtKind::Switch { discriminant, cases } => self.exec_switch(discriminant, cases, own_label),
            other => self.exec_stmt_kind(other),
        }
    }

    fn exec_stmt_kind(&mut self, kind: &StmtKind) -> Result<(), EvalError> {
        match kind {
            StmtKind::Expr(expr) => {
                self.eval_expr(expr)?;
                Ok(())
            }
            StmtKind::VarDecl(decls) => {
                for (name, init) in decls {
                    let value = match init {
                        Some(e) => self.eval_expr(e)?,
                        None => Value::Undefined,
                    };
                    self.env.define(*name, value);
                }
                Ok(())
            }
            StmtKind::Block(stmts) => {
                self.env.push_scope();
                let result = self.exec_stmts(stmts);
                self.env.pop_scope();
                result
            }
            StmtKind::If {
                test,
                consequent,
                alternate,
            } => {
                if to_boolean(&self.eval_expr(test)?) {
                    self.exec_stmt(consequent)
                } else if let Some(alt) = alternate {
                    self.exec_stmt(alt)
                } else {
                    Ok(())
                }
            }
            StmtKind::Return(expr) => {
                let value = match expr {
                    Some(e) => self.eval_expr(e)?,
                    None => Value::Undefined,
                };
                Err(EvalError::return_signal(value))
            }
            StmtKind::Break(label) => Err(EvalError::break_signal(*label)),
            StmtKind::Continue(label) => Err(EvalError::continue_signal(*label)),
            StmtKind::Throw(expr) => {
                let value = self.eval_expr(expr)?;
                Err(EvalError::user_thrown(value))
            }
            StmtKind::Try { block, catch, finally } => self.exec_try(block, catch, finally),
            StmtKind::FunctionDecl(func) => {
                self.define_function_decl(func);
                Ok(())
            }
            StmtKind::Empty => Ok(()),
            StmtKind::Labeled { .. }
            | StmtKind::While { .. }
            | StmtKind::DoWhile { .. }
            | StmtKind::For { .. }
            | StmtKind::ForIn { .. }
            | StmtKind::Switch { .. } => {
                unreachable!("loop/labeled/switch statements are dispatched by exec_stmt_labeled before reaching here")
            }
        }
    }

    fn run_loop_body(&mut self, body: &Stmt, own_label: Option<Name>) -> Result<Option<LoopSignal>, EvalError> {
        match self.exec_stmt_labeled(body, None) {
            Ok(()) => Ok(None),
            Err(e) => match &e.control_flow {
                Some(ControlFlow::Break(label)) if label.is_none() || *label == own_label => Ok(Some(LoopSignal::Break)),
                Some(ControlFlow::Continue(label)) if label.is_none() || *label == own_label => Ok(None),
                _ => Err(e),
            },
        }
    }

    fn exec_while(&mut self, test: &jsi_ir::Expr, body: &Stmt, own_label: Option<Name>) -> Result<(), EvalError> {
        loop {
            if !to_boolean(&self.eval_expr(test)?) {
                break;
            }
            if matches!(self.run_loop_body(body, own_label)?, Some(LoopSignal::Break)) {
                break;
            }
        }
        Ok(())
    }

    fn exec_do_while(&mut self, body: &Stmt, test: &jsi_ir::Expr, own_label: Option<Name>) -> Result<(), EvalError> {
        loop {
            if matches!(self.run_loop_body(body, own_label)?, Some(LoopSignal::Break)) {
                break;
            }
            if !to_boolean(&self.eval_expr(test)?) {
                break;
            }
        }
        Ok(())
    }

    fn exec_for(
        &mut self,
        init: &Option<Box<StmtKind>>,
        test: &Option<jsi_ir::Expr>,
        update: &Option<jsi_ir::Expr>,
        body: &Stmt,
        own_label: Option<Name>,
    ) -> Result<(), EvalError> {
        self.env.push_scope();
        let result = (|| -> Result<(), EvalError> {
            if let Some(init) = init {
                self.exec_stmt_kind(init)?;
            }
            loop {
                if let Some(test) = test {
                    if !to_boolean(&self.eval_expr(test)?) {
                        break;
                    }
                }
                if matches!(self.run_loop_body(body, own_label)?, Some(LoopSignal::Break)) {
                    break;
                }
                if let Some(update) = update {
                    self.eval_expr(update)?;
                }
            }
            Ok(())
        })();
        self.env.pop_scope();
        result
    }

    fn exec_for_in(
        &mut self,
        declares: bool,
        binding: Name,
        object: &jsi_ir::Expr,
        body: &Stmt,
        own_label: Option<Name>,
    ) -> Result<(), EvalError> {
        let receiver = self.eval_expr(object)?;
        let keys: Vec<String> = match &receiver {
            Value::Array(heap) => (0..heap.borrow().len()).map(|i| i.to_string()).collect(),
            Value::Object(heap) => heap.borrow().keys().cloned().collect(),
            _ => Vec::new(),
        };
        self.env.push_scope();
        let result = (|| -> Result<(), EvalError> {
            for key in keys {
                let key_value = Value::string(key);
                if declares {
                    self.env.define(binding, key_value);
                } else {
                    self.env.assign(binding, key_value);
                }
                if matches!(self.run_loop_body(body, own_label)?, Some(LoopSignal::Break)) {
                    break;
                }
            }
            Ok(())
        })();
        self.env.pop_scope();
        result
    }

    /// `switch (discriminant) { case k: ...; default: ...; }` (spec 4.4):
    /// matches the first `case` whose test is strictly equal to the
    /// discriminant, or `default` if no `case` matches, then falls through
    /// the remaining cases' bodies in order until an unlabeled (or
    /// own-labeled) `break` exits. `continue` is not intercepted here — it
    /// propagates to whatever loop encloses this switch, matching ordinary
    /// JS scoping.
    fn exec_switch(&mut self, discriminant: &jsi_ir::Expr, cases: &[SwitchCase], own_label: Option<Name>) -> Result<(), EvalError> {
        let value = self.eval_expr(discriminant)?;

        let mut matched = None;
        for (i, case) in cases.iter().enumerate() {
            if let Some(test) = &case.test {
                if strict_equals(&value, &self.eval_expr(test)?) {
                    matched = Some(i);
                    break;
                }
            }
        }
        let start = match matched {
            Some(i) => i,
            None => match cases.iter().position(|c| c.test.is_none()) {
                Some(i) => i,
                None => return Ok(()),
            },
        };

        self.env.push_scope();
        let result = (|| -> Result<(), EvalError> {
            for case in &cases[start..] {
                match self.exec_stmts(&case.body) {
                    Ok(()) => {}
                    Err(e) => match &e.control_flow {
                        Some(ControlFlow::Break(label)) if label.is_none() || *label == own_label => {
                            return Ok(());
                        }
                        _ => return Err(e),
                    },
                }
            }
            Ok(())
        })();
        self.env.pop_scope();
        result
    }

    /// `try`/`catch`/`finally` (spec 7): catch only intercepts errors for
    /// which `is_catchable()` is true (excludes `ResourceExhausted` and any
    /// in-flight break/continue/return signal). `finally` always runs, and
    /// a new signal it produces replaces whatever was pending.
    fn exec_try(
        &mut self,
        block: &[Stmt],
        catch: &Option<(Option<Name>, Vec<Stmt>)>,
        finally: &Option<Vec<Stmt>>,
    ) -> Result<(), EvalError> {
        self.env.push_scope();
        let block_result = self.exec_stmts(block);
        self.env.pop_scope();

        let mut pending = match block_result {
            Ok(()) => Ok(()),
            Err(e) if e.is_catchable() => match catch {
                Some((param, catch_body)) => {
                    self.env.push_scope();
                    if let Some(param) = param {
                        let thrown = e.propagated_value.clone().unwrap_or(Value::Undefined);
                        self.env.define(*param, thrown);
                    }
                    let catch_result = self.exec_stmts(catch_body);
                    self.env.pop_scope();
                    catch_result
                }
                None => Err(e),
            },
            Err(e) => Err(e),
        };

        if let Some(finally_body) = finally {
            self.env.push_scope();
            let finally_result = self.exec_stmts(finally_body);
            self.env.pop_scope();
            if finally_result.is_err() {
                pending = finally_result;
            }
        }
        pending
    }
}
