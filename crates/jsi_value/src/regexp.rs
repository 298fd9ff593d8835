//! `RegExp` values.
//!
//! Backed by `regress`, an ECMAScript-semantics regex engine (chosen over
//! the `regex` crate because `regex` deliberately does not implement
//! backreferences or the lookaround JS regex syntax allows — `regress` is
//! built specifically to track the ECMAScript regex grammar). Flag
//! handling follows the original's `JS_RegExp` construction: `g`/`i`/`m`/`s`
//! are meaningful to matching; `d`/`u`/`v`/`y` are accepted and stored for
//! `.flags`/`.source` introspection even where this interpreter's matching
//! does not need to special-case them.

use bitflags::bitflags;

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
    pub struct RegExpFlags: u16 {
        const GLOBAL      = 1 << 0; // g
        const IGNORE_CASE = 1 << 1; // i
        const MULTILINE   = 1 << 2; // m
        const DOT_ALL     = 1 << 3; // s
        const UNICODE     = 1 << 4; // u
        const UNICODE_SETS = 1 << 5; // v
        const STICKY      = 1 << 6; // y
        const HAS_INDICES = 1 << 7; // d
    }
}

impl RegExpFlags {
    #[must_use]
    pub fn parse(flags: &str) -> Option<RegExpFlags> {
        let mut out = RegExpFlags::empty();
        for c in flags.chars() {
            let bit = match c {
                'g' => RegExpFlags::GLOBAL,
                'i' => RegExpFlags::IGNORE_CASE,
                'm' => RegExpFlags::MULTILINE,
                's' => RegExpFlags::DOT_ALL,
                'u' => RegExpFlags::UNICODE,
                'v' => RegExpFlags::UNICODE_SETS,
                'y' => RegExpFlags::STICKY,
                'd' => RegExpFlags::HAS_INDICES,
                _ => return None,
            };
            out |= bit;
        }
        Some(out)
    }

    #[must_use]
    pub fn to_js_string(self) -> String {
        let mut s = String::new();
        if self.contains(RegExpFlags::HAS_INDICES) {
            s.push('d');
        }
        if self.contains(RegExpFlags::GLOBAL) {
            s.push('g');
        }
        if self.contains(RegExpFlags::IGNORE_CASE) {
            s.push('i');
        }
        if self.contains(RegExpFlags::MULTILINE) {
            s.push('m');
        }
        if self.contains(RegExpFlags::DOT_ALL) {
            s.push('s');
        }
        if self.contains(RegExpFlags::UNICODE) {
            s.push('u');
        }
        if self.contains(RegExpFlags::UNICODE_SETS) {
            s.push('v');
        }
        if self.contains(RegExpFlags::STICKY) {
            s.push('y');
        }
        s
    }
}

pub struct JsRegExp {
    pub source: Box<str>,
    pub flags: RegExpFlags,
    compiled: regress::Regex,
    /// `lastIndex`, only meaningful for `g`/`y` regexes (spec: RegExp
    /// caches a compiled matcher; `lastIndex` is the one piece of mutable
    /// state a RegExp value carries between calls).
    pub last_index: std::cell::Cell<usize>,
}

impl Clone for JsRegExp {
    #[allow(
        clippy::expect_used,
        reason = "the literal empty pattern is a compile-time-known-valid fallback, not a fallible external input"
    )]
    fn clone(&self) -> Self {
        // `regress::Regex` carries no `Clone` impl; recompiling from the
        // source/flags that already compiled once is cheap and can only
        // fail if `regress` itself is non-deterministic, which it isn't.
        // `new RegExp(otherRegExp)` is the only caller of this path.
        match JsRegExp::new(&self.source, self.flags) {
            Ok(re) => re,
            Err(_) => JsRegExp::new("(?:)", RegExpFlags::empty())
                .expect("the empty-match pattern always compiles"),
        }
    }
}

impl JsRegExp {
    pub fn new(pattern: &str, flags: RegExpFlags) -> Result<Self, regress::Error> {
        let mut flag_str = String::new();
        if flags.contains(RegExpFlags::IGNORE_CASE) {
            flag_str.push('i');
        }
        if flags.contains(RegExpFlags::MULTILINE) {
            flag_str.push('m');
        }
        if flags.contains(RegExpFlags::DOT_ALL) {
            flag_str.push('s');
        }
        if flags.contains(RegExpFlags::UNICODE) {
            flag_str.push('u');
        }
        let compiled = regress::Regex::with_flags(pattern, flag_str.as_str())?;
        Ok(JsRegExp {
            source: pattern.into(),
            flags,
            compiled,
            last_index: std::cell::Cell::new(0),
        })
    }

    #[must_use]
    pub fn is_global_or_sticky(&self) -> bool {
        self.flags
            .intersects(RegExpFlags::GLOBAL | RegExpFlags::STICKY)
    }

    #[must_use]
    pub fn find(&self, text: &str, start: usize) -> Option<regress::Match> {
        self.compiled.find_from(text, start).next()
    }

    pub fn find_iter<'t>(&'t self, text: &'t str) -> impl Iterator<Item = regress::Match> + 't {
        self.compiled.find_iter(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_flags() {
        let f = RegExpFlags::parse("gim").unwrap();
        assert!(f.contains(RegExpFlags::GLOBAL));
        assert!(f.contains(RegExpFlags::IGNORE_CASE));
        assert!(f.contains(RegExpFlags::MULTILINE));
    }

    #[test]
    fn rejects_unknown_flag() {
        assert!(RegExpFlags::parse("q").is_none());
    }

    #[test]
    fn round_trips_flag_order() {
        let f = RegExpFlags::parse("gi").unwrap();
        assert_eq!(f.to_js_string(), "gi");
    }

    #[test]
    fn compiles_and_matches() {
        let re = JsRegExp::new("a(b+)", RegExpFlags::empty()).unwrap();
        let m = re.find("xabbbc", 0).unwrap();
        assert_eq!(&"xabbbc"[m.range()], "abbb");
    }
}
