//! End-to-end scenarios: literal programs run through the public facade,
//! checked against their expected result.

use std::collections::HashMap;

use jsic::{build, call, Value};

fn run(src: &str, function_name: &str, args: &[Value]) -> Value {
    let mut interp = build(src).unwrap_or_else(|e| panic!("build failed: {e}"));
    call(&mut interp, function_name, args, HashMap::new())
        .unwrap_or_else(|e| panic!("call failed: {e}"))
}

fn number(v: &Value) -> f64 {
    match v {
        Value::Number(n) => *n,
        other => panic!("expected a number, got {other:?}"),
    }
}

fn string(v: &Value) -> String {
    match v {
        Value::Str(s) => s.to_string(),
        other => panic!("expected a string, got {other:?}"),
    }
}

#[test]
fn square_plus_one() {
    let result = run("function f(a){return a*a+1;}", "f", &[Value::Number(5.0)]);
    assert_eq!(number(&result), 26.0);
}

#[test]
fn split_reverse_join_round_trips_characters() {
    let result = run(
        r#"function g(s){var r=s.split("").reverse().join("");return r;}"#,
        "g",
        &[Value::string("abc")],
    );
    assert_eq!(string(&result), "cba");
}

#[test]
fn modulo_normalised_into_nonnegative_range() {
    let result = run("function h(x){return (x%10+10)%10;}", "h", &[Value::Number(-3.0)]);
    assert_eq!(number(&result), 7.0);
}

#[test]
fn object_literal_method_call() {
    let result = run(
        r#"function k(a,b){var o={k:function(a,b){return a<b?b-a:a-b;}};return o.k(a,b);}"#,
        "k",
        &[Value::Number(2.0), Value::Number(9.0)],
    );
    assert_eq!(number(&result), 7.0);
}

#[test]
fn thrown_number_is_caught_and_incremented() {
    let result = run(
        "function z(){try{throw 42}catch(e){return e+1}}",
        "z",
        &[],
    );
    assert_eq!(number(&result), 43.0);
}

#[test]
fn classic_for_loop_accumulates_array_sum() {
    let array = Value::array(vec![
        Value::Number(1.0),
        Value::Number(2.0),
        Value::Number(3.0),
        Value::Number(4.0),
    ]);
    let result = run(
        "function p(a){for(var i=0,s=0;i<a.length;i++)s+=a[i];return s;}",
        "p",
        &[array],
    );
    assert_eq!(number(&result), 10.0);
}

#[test]
fn regex_replace_with_capture_group_backreference() {
    let result = run(
        r#"function q(){var r=/a(b+)/; return "xabbbc".replace(r,"Z$1")}"#,
        "q",
        &[],
    );
    assert_eq!(string(&result), "xZbbbc");
}

#[test]
fn negative_index_normalised_against_array_length() {
    let array = Value::array(vec![
        Value::Number(10.0),
        Value::Number(20.0),
        Value::Number(30.0),
        Value::Number(40.0),
    ]);
    let result = run(
        "function n(d,e){return (d%e.length+e.length)%e.length;}",
        "n",
        &[Value::Number(-1.0), array],
    );
    assert_eq!(number(&result), 3.0);
}

#[test]
fn switch_falls_through_until_a_break() {
    let result = run(
        r#"function w(n){var out="";switch(n){case 1:out+="a";case 2:out+="b";break;case 3:out+="c";default:out+="d";}return out;}"#,
        "w",
        &[Value::Number(1.0)],
    );
    assert_eq!(string(&result), "ab");
}

#[test]
fn switch_with_no_matching_case_runs_default() {
    let result = run(
        r#"function w(n){var out="";switch(n){case 1:out+="a";break;default:out+="d";case 3:out+="c";}return out;}"#,
        "w",
        &[Value::Number(9.0)],
    );
    assert_eq!(string(&result), "dc");
}
