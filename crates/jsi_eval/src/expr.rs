//! Expression evaluation (spec 4.3). Statement-level control flow lives in
//! [`crate::interpreter`]; this module is the recursive `Expr -> Value` walk.

use indexmap::IndexMap;
use jsi_ir::{AssignOp, BinaryOp, Expr, ExprKind, Fixity, UnaryOp};
use jsi_value::{
    invalid_regex, not_a_function, to_boolean, to_number, to_string, type_error, EvalResult,
    JsRegExp, RegExpFlags, Value,
};

use crate::interpreter::Interpreter;
use crate::{function_val, methods, operators, unary_operators};

/// Builtin namespace identifiers that are resolved as static receivers
/// rather than ordinary variables (spec 4.5's static-member table), unless
/// shadowed by a real binding of the same name.
const STATIC_NAMESPACES: [&str; 5] = ["Math", "String", "Array", "JSON", "Date"];

impl Interpreter {
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Undefined => Ok(Value::Undefined),
            ExprKind::Null => Ok(Value::Null),
            ExprKind::This => Ok(self.env.lookup(self.this_name).unwrap_or(Value::Undefined)),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Number(n) => Ok(Value::Number(*n)),
            ExprKind::Str(s) => Ok(Value::string(&**s)),
            ExprKind::Regex { pattern, flags } => self.eval_regex_literal(pattern, flags),
            ExprKind::Identifier(name) => Ok(self.env.lookup(*name).unwrap_or(Value::Undefined)),
            ExprKind::Array(elements) => self.eval_array_literal(elements),
            ExprKind::Object(props) => self.eval_object_literal(props),
            ExprKind::Function(func) => Ok(function_val::make_closure(
                func,
                self.env.current_scope(),
                &self.interner,
            )),
            ExprKind::Unary { op, expr } => {
                let value = self.eval_expr(expr)?;
                unary_operators::evaluate_unary(*op, &value)
            }
            ExprKind::Update { op, fixity, target } => self.eval_update(*op, *fixity, target),
            ExprKind::Binary { op, left, right } => self.eval_binary(*op, left, right),
            ExprKind::Assign { op, target, value } => self.eval_assign(*op, target, value),
            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            } => {
                if to_boolean(&self.eval_expr(test)?) {
                    self.eval_expr(consequent)
                } else {
                    self.eval_expr(alternate)
                }
            }
            ExprKind::Call { callee, args, optional } => self.eval_call(callee, args, *optional),
            ExprKind::New { callee, args } => self.eval_new(callee, args),
            ExprKind::Member {
                object,
                property,
                optional,
            } => {
                let receiver = self.eval_expr(object)?;
                if receiver.is_nullish() {
                    if *optional {
                        return Ok(Value::Undefined);
                    }
                    let key = self.member_key_as_string(property)?;
                    return Err(jsi_value::cannot_read_property_of(
                        &key,
                        &to_string(&receiver),
                    ));
                }
                let key = self.member_key_as_string(property)?;
                self.get_property(&receiver, &key)
            }
            ExprKind::Sequence(exprs) => {
                let mut last = Value::Undefined;
                for e in exprs {
                    last = self.eval_expr(e)?;
                }
                Ok(last)
            }
        }
    }

    pub(crate) fn eval_args(&mut self, args: &[Expr]) -> Result<Vec<Value>, jsi_value::EvalError> {
        args.iter().map(|a| self.eval_expr(a)).collect()
    }

    fn eval_array_literal(&mut self, elements: &[Option<Expr>]) -> EvalResult {
        let mut items = Vec::with_capacity(elements.len());
        for el in elements {
            items.push(match el {
                Some(e) => self.eval_expr(e)?,
                None => Value::Undefined,
            });
        }
        Ok(Value::array(items))
    }

    fn eval_regex_literal(&self, pattern: &str, flags: &str) -> EvalResult {
        let parsed_flags = RegExpFlags::parse(flags)
            .ok_or_else(|| invalid_regex(pattern, "unrecognized flag"))?;
        let re = JsRegExp::new(pattern, parsed_flags)
            .map_err(|e| invalid_regex(pattern, &e.to_string()))?;
        Ok(Value::regex(re))
    }

    fn eval_update(&mut self, op: UnaryOp, fixity: Fixity, target: &Expr) -> EvalResult {
        let old = to_number(&self.eval_lvalue_get(target)?);
        let new = match op {
            UnaryOp::Inc => old + 1.0,
            UnaryOp::Dec => old - 1.0,
            _ => unreachable!("Update node carries only Inc/Dec"),
        };
        self.eval_lvalue_set(target, Value::Number(new))?;
        Ok(Value::Number(match fixity {
            Fixity::Prefix => new,
            Fixity::Postfix => old,
        }))
    }

    fn eval_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> EvalResult {
        if op.short_circuits() {
            let l = self.eval_expr(left)?;
            return match op {
                BinaryOp::LogicalOr => {
                    if to_boolean(&l) {
                        Ok(l)
                    } else {
                        self.eval_expr(right)
                    }
                }
                BinaryOp::LogicalAnd => {
                    if to_boolean(&l) {
                        self.eval_expr(right)
                    } else {
                        Ok(l)
                    }
                }
                BinaryOp::NullishCoalesce => {
                    if l.is_nullish() {
                        self.eval_expr(right)
                    } else {
                        Ok(l)
                    }
                }
                _ => unreachable!("short_circuits() only true for the three arms above"),
            };
        }
        let l = self.eval_expr(left)?;
        let r = self.eval_expr(right)?;
        operators::evaluate_binary(op, &l, &r)
    }

    fn eval_assign(&mut self, op: Option<AssignOp>, target: &Expr, value: &Expr) -> EvalResult {
        let Some(assign_op) = op else {
            let v = self.eval_expr(value)?;
            self.eval_lvalue_set(target, v.clone())?;
            return Ok(v);
        };

        if assign_op.short_circuits() {
            let current = self.eval_lvalue_get(target)?;
            let should_assign = match assign_op {
                AssignOp::LogicalOr => !to_boolean(&current),
                AssignOp::LogicalAnd => to_boolean(&current),
                AssignOp::NullishCoalesce => current.is_nullish(),
                _ => unreachable!("short_circuits() only true for the three arms above"),
            };
            if !should_assign {
                return Ok(current);
            }
            let v = self.eval_expr(value)?;
            self.eval_lvalue_set(target, v.clone())?;
            return Ok(v);
        }

        let current = self.eval_lvalue_get(target)?;
        let rhs = self.eval_expr(value)?;
        let result = operators::evaluate_binary(assign_op.as_binary(), &current, &rhs)?;
        self.eval_lvalue_set(target, result.clone())?;
        Ok(result)
    }

    fn eval_new(&mut self, callee: &Expr, args: &[Expr]) -> EvalResult {
        let ExprKind::Identifier(name) = &callee.kind else {
            return Err(type_error("'new' requires a constructor name"));
        };
        let ctor = self.interner.lookup(*name).to_owned();
        match ctor.as_str() {
            "Date" => methods::date::construct(self, args),
            "RegExp" => methods::regexp::construct(self, args),
            "Error" => {
                let arg_values = self.eval_args(args)?;
                let message = arg_values.first().map(to_string).unwrap_or_default();
                let mut entries = IndexMap::new();
                entries.insert("name".to_owned(), Value::string("Error"));
                entries.insert("message".to_owned(), Value::string(message));
                Ok(Value::object(entries))
            }
            other => Err(type_error(format!("'{other}' is not a constructor"))),
        }
    }

    /// Dispatches a call expression (spec 4.3 step 8 `name(args)` /
    /// `name.member(args)`): bare calls invoke a `Value::Function` with no
    /// receiver; member calls resolve to either a static namespace method
    /// (`Math.pow(...)`), the narrow `X.prototype.method.call/apply(...)`
    /// rebinding form (spec 4.5), or an instance method on the receiver.
    fn eval_call(&mut self, callee: &Expr, args: &[Expr], optional: bool) -> EvalResult {
        if let ExprKind::Member {
            object,
            property,
            optional: member_optional,
        } = &callee.kind
        {
            if let Some(result) = self.try_eval_prototype_rebind(object, property, args)? {
                return Ok(result);
            }

            if let ExprKind::Identifier(name) = &object.kind {
                let text = self.interner.lookup(*name).to_owned();
                if self.env.lookup(*name).is_none() && STATIC_NAMESPACES.contains(&text.as_str()) {
                    let jsi_ir::MemberKey::Static(method_name) = property else {
                        return Err(type_error("computed static member access is not supported"));
                    };
                    let method = self.interner.lookup(*method_name).to_owned();
                    let arg_values = self.eval_args(args)?;
                    return methods::dispatch_static(self, &text, &method, &arg_values);
                }
            }

            let receiver = self.eval_expr(object)?;
            if *member_optional && receiver.is_nullish() {
                return Ok(Value::Undefined);
            }
            let key = self.member_key_as_string(property)?;
            if receiver.is_nullish() {
                return Err(jsi_value::cannot_read_property_of(&key, &to_string(&receiver)));
            }
            let arg_values = self.eval_args(args)?;
            return methods::dispatch_instance(self, &receiver, &key, &arg_values);
        }

        let callee_val = self.eval_expr(callee)?;
        if optional && callee_val.is_nullish() {
            return Ok(Value::Undefined);
        }
        let arg_values = self.eval_args(args)?;
        match callee_val {
            Value::Function(f) => self.invoke(&f, &arg_values, Value::Undefined),
            other => Err(not_a_function(&to_string(&other))),
        }
    }

    /// `X.prototype.method.call(receiver, ...args)` / `.apply(receiver,
    /// argsArray)` where `X` is a static namespace class (spec 4.5:
    /// "supported only when the callee is a constructor-typed static
    /// class" — not general user-function `this`-rebinding).
    fn try_eval_prototype_rebind(
        &mut self,
        object: &Expr,
        property: &jsi_ir::MemberKey,
        args: &[Expr],
    ) -> Result<Option<Value>, jsi_value::EvalError> {
        let jsi_ir::MemberKey::Static(call_or_apply) = property else {
            return Ok(None);
        };
        let call_or_apply = self.interner.lookup(*call_or_apply).to_owned();
        if call_or_apply != "call" && call_or_apply != "apply" {
            return Ok(None);
        }
        let ExprKind::Member {
            object: prototype_obj,
            property: jsi_ir::MemberKey::Static(method_name),
            ..
        } = &object.kind
        else {
            return Ok(None);
        };
        let ExprKind::Member {
            object: class_obj,
            property: jsi_ir::MemberKey::Static(proto_name),
            ..
        } = &prototype_obj.kind
        else {
            return Ok(None);
        };
        if self.interner.lookup(*proto_name) != "prototype" {
            return Ok(None);
        }
        let ExprKind::Identifier(class_name) = &class_obj.kind else {
            return Ok(None);
        };
        let class_text = self.interner.lookup(*class_name).to_owned();
        if !STATIC_NAMESPACES.contains(&class_text.as_str()) {
            return Ok(None);
        }
        let method = self.interner.lookup(*method_name).to_owned();

        let arg_values = self.eval_args(args)?;
        let mut it = arg_values.into_iter();
        let receiver = it
            .next()
            .ok_or_else(|| type_error(format!("{method} takes one or more arguments")))?;
        let rest: Vec<Value> = if call_or_apply == "apply" {
            match it.next() {
                Some(Value::Array(heap)) => heap.borrow().clone(),
                _ => Vec::new(),
            }
        } else {
            it.collect()
        };
        methods::dispatch_instance(self, &receiver, &method, &rest).map(Some)
    }
}
