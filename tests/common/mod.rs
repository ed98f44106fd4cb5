/*!
 * Reference Stream
 * Straightforward Vec-backed stream used as the conformance oracle
 *
 * Covers the subset of values the conformance tests generate: text, integers,
 * booleans, nil, short decimal floats and nested lists. printf handles `%s`,
 * `%d` and `%%` only.
 */

#![allow(dead_code)]

use bytes::Bytes;
use string_sink::{SinkError, SinkResult, Size, Stream, Value};

#[derive(Debug, Default)]
pub struct ReferenceStream {
    content: Vec<u8>,
}

impl ReferenceStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }
}

fn to_s(value: &Value<'_>) -> Vec<u8> {
    match value {
        Value::Str(s) => s.as_bytes().to_vec(),
        Value::Bytes(b) => b.to_vec(),
        Value::Int(i) => i.to_string().into_bytes(),
        Value::Float(f) => format!("{:?}", f).into_bytes(),
        Value::Bool(b) => b.to_string().into_bytes(),
        Value::Nil => Vec::new(),
        Value::List(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(|item| match item {
                    Value::Str(s) => format!("{:?}", s),
                    Value::Nil => "nil".to_string(),
                    other => String::from_utf8_lossy(&to_s(other)).into_owned(),
                })
                .collect();
            format!("[{}]", parts.join(", ")).into_bytes()
        }
        Value::Opaque(name) => panic!("reference stream cannot render {}", name),
    }
}

fn puts_one(out: &mut Vec<u8>, value: &Value<'_>) {
    match value {
        Value::List(items) if items.is_empty() => out.push(b'\n'),
        Value::List(items) => items.iter().for_each(|item| puts_one(out, item)),
        other => {
            let text = to_s(other);
            let terminated = text.ends_with(b"\n");
            out.extend_from_slice(&text);
            if !terminated {
                out.push(b'\n');
            }
        }
    }
}

impl Stream for ReferenceStream {
    fn write(&mut self, data: &[u8]) -> SinkResult<Size> {
        self.content.extend_from_slice(data);
        Ok(data.len())
    }

    fn append(&mut self, data: &[u8]) -> SinkResult<&mut Self> {
        self.content.extend_from_slice(data);
        Ok(self)
    }

    fn putc<'a>(&mut self, value: Value<'a>) -> SinkResult<Value<'a>> {
        match &value {
            Value::Int(i) => self.content.push((i & 0xff) as u8),
            Value::Str(s) => {
                let first = s
                    .chars()
                    .next()
                    .ok_or_else(|| SinkError::argument("empty string"))?;
                let mut utf8 = [0; 4];
                self.content
                    .extend_from_slice(first.encode_utf8(&mut utf8).as_bytes());
            }
            other => panic!("reference putc cannot take {:?}", other),
        }
        Ok(value)
    }

    fn print(&mut self, args: &[Value<'_>]) -> SinkResult<()> {
        for arg in args {
            let text = to_s(arg);
            self.content.extend_from_slice(&text);
        }
        Ok(())
    }

    fn puts(&mut self, args: &[Value<'_>]) -> SinkResult<()> {
        if args.is_empty() {
            self.content.push(b'\n');
        }
        for arg in args {
            puts_one(&mut self.content, arg);
        }
        Ok(())
    }

    fn printf(&mut self, fmt: &str, args: &[Value<'_>]) -> SinkResult<()> {
        let mut rendered = String::new();
        let mut args = args.iter();
        let mut chars = fmt.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                rendered.push(c);
                continue;
            }
            match chars.next() {
                Some('%') => rendered.push('%'),
                Some('s') => {
                    let arg = args.next().expect("missing %s argument");
                    rendered.push_str(&String::from_utf8_lossy(&to_s(arg)));
                }
                Some('d') => match args.next() {
                    Some(Value::Int(i)) => rendered.push_str(&i.to_string()),
                    other => panic!("reference %d cannot take {:?}", other),
                },
                other => panic!("reference printf cannot handle %{:?}", other),
            }
        }

        self.content.extend_from_slice(rendered.as_bytes());
        Ok(())
    }

    fn string(&self) -> Bytes {
        Bytes::copy_from_slice(&self.content)
    }
}

/// One recorded stream call with owned arguments
#[derive(Debug, Clone)]
pub enum Op {
    Write(String),
    Append(String),
    PutcInt(i64),
    PutcStr(String),
    Print(Vec<Arg>),
    Puts(Vec<Arg>),
    Printf(String, Vec<Arg>),
}

/// Owned argument that borrows into a `Value` at replay time
#[derive(Debug, Clone)]
pub enum Arg {
    Str(String),
    Int(i64),
    Bool(bool),
    Nil,
    Float(f64),
    List(Vec<Arg>),
}

impl Arg {
    pub fn value(&self) -> Value<'_> {
        match self {
            Arg::Str(s) => Value::Str(s),
            Arg::Int(i) => Value::Int(*i),
            Arg::Bool(b) => Value::Bool(*b),
            Arg::Nil => Value::Nil,
            Arg::Float(f) => Value::Float(*f),
            Arg::List(items) => Value::List(items.iter().map(Arg::value).collect()),
        }
    }
}

fn values(args: &[Arg]) -> Vec<Value<'_>> {
    args.iter().map(Arg::value).collect()
}

/// Observable result of one call
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Count(Size),
    Unit,
    Returned(String),
}

/// Apply `op` to any stream, capturing what the caller can observe
pub fn apply<S: Stream>(stream: &mut S, op: &Op) -> SinkResult<Outcome> {
    match op {
        Op::Write(s) => stream.write(s.as_bytes()).map(Outcome::Count),
        Op::Append(s) => stream.append(s.as_bytes()).map(|_| Outcome::Unit),
        Op::PutcInt(i) => stream
            .putc(Value::Int(*i))
            .map(|v| Outcome::Returned(format!("{:?}", v))),
        Op::PutcStr(s) => stream
            .putc(Value::Str(s))
            .map(|v| Outcome::Returned(format!("{:?}", v))),
        Op::Print(args) => stream.print(&values(args)).map(|_| Outcome::Unit),
        Op::Puts(args) => stream.puts(&values(args)).map(|_| Outcome::Unit),
        Op::Printf(fmt, args) => stream.printf(fmt, &values(args)).map(|_| Outcome::Unit),
    }
}
