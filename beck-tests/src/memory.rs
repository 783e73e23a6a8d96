use beck::{AsValue, DataType, Error, Result, Row, RowsAffected, Value};
use beck_embed::{Engine, EngineColumn, Execution, RowCursor};
use std::collections::HashMap;

/// Reference in-memory engine.
///
/// Understands just enough SQL for the driver scenarios: CREATE/DROP
/// TABLE, INSERT ... VALUES, DELETE and single-table SELECT with optional
/// `=`/OR filters. Parameters use the native `?N` markers and unquoted
/// identifiers are uppercased, the way the classic embedded engines do.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    tables: HashMap<String, Table>,
}

#[derive(Debug)]
struct Table {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

#[derive(Debug, Clone)]
struct Column {
    name: String,
    data_type: DataType,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Engine for MemoryEngine {
    const NAME: &'static str = "memory";

    fn open(_target: &str) -> Result<Self> {
        Ok(Self::default())
    }

    fn execute(&mut self, sql: &str, params: &[Value], _auto_commit: bool) -> Result<Execution> {
        let tokens = tokenize(sql)?;
        let mut parser = Parser {
            tokens: &tokens,
            pos: 0,
            params,
        };
        match parser.keyword()?.as_str() {
            "CREATE" => self.create(&mut parser),
            "DROP" => self.drop(&mut parser),
            "INSERT" => self.insert(&mut parser),
            "DELETE" => self.delete(&mut parser),
            "SELECT" => self.select(&mut parser),
            other => Err(engine_error(format!("unsupported statement `{other}`"))),
        }
    }
}

impl MemoryEngine {
    fn create(&mut self, parser: &mut Parser) -> Result<Execution> {
        parser.expect_keyword("TABLE")?;
        let name = parser.ident()?.to_ascii_uppercase();
        if self.tables.contains_key(&name) {
            return Err(engine_error(format!("table {name} already exists")));
        }
        parser.expect_punct('(')?;
        let mut columns = Vec::new();
        loop {
            let column = parser.ident()?.to_ascii_uppercase();
            let data_type = data_type_of(&parser.keyword()?)?;
            // Swallow type arguments and constraints, e.g. VARCHAR(255) NOT NULL.
            if parser.eat_punct('(') {
                while !parser.eat_punct(')') {
                    parser.skip()?;
                }
            }
            while matches!(parser.peek(), Some(Token::Ident(..))) {
                parser.skip()?;
            }
            columns.push(Column {
                name: column,
                data_type,
            });
            if parser.eat_punct(',') {
                continue;
            }
            parser.expect_punct(')')?;
            break;
        }
        self.tables.insert(
            name,
            Table {
                columns,
                rows: Vec::new(),
            },
        );
        Ok(Execution::Affected(RowsAffected::default()))
    }

    fn drop(&mut self, parser: &mut Parser) -> Result<Execution> {
        parser.expect_keyword("TABLE")?;
        let if_exists = if parser.eat_keyword("IF") {
            parser.expect_keyword("EXISTS")?;
            true
        } else {
            false
        };
        let name = parser.ident()?.to_ascii_uppercase();
        if self.tables.remove(&name).is_none() && !if_exists {
            return Err(engine_error(format!("no such table: {name}")));
        }
        Ok(Execution::Affected(RowsAffected::default()))
    }

    fn insert(&mut self, parser: &mut Parser) -> Result<Execution> {
        parser.expect_keyword("INTO")?;
        let name = parser.ident()?.to_ascii_uppercase();
        parser.expect_keyword("VALUES")?;
        let mut tuples = Vec::new();
        loop {
            parser.expect_punct('(')?;
            let mut values = Vec::new();
            loop {
                values.push(parser.value()?);
                if parser.eat_punct(',') {
                    continue;
                }
                parser.expect_punct(')')?;
                break;
            }
            tuples.push(values);
            if !parser.eat_punct(',') {
                break;
            }
        }
        let Some(table) = self.tables.get_mut(&name) else {
            return Err(engine_error(format!("no such table: {name}")));
        };
        let mut inserted = 0;
        for values in tuples {
            if values.len() != table.columns.len() {
                return Err(engine_error(format!(
                    "expected {} values for {name}, got {}",
                    table.columns.len(),
                    values.len()
                )));
            }
            let row = values
                .into_iter()
                .zip(&table.columns)
                .map(|(value, column)| coerce(value, column))
                .collect::<Result<Row>>()?;
            table.rows.push(row);
            inserted += 1;
        }
        Ok(Execution::Affected(RowsAffected {
            rows_affected: inserted,
            last_affected_id: None,
        }))
    }

    fn delete(&mut self, parser: &mut Parser) -> Result<Execution> {
        parser.expect_keyword("FROM")?;
        let name = parser.ident()?.to_ascii_uppercase();
        let filter = if parser.eat_keyword("WHERE") {
            Some(parse_filter(parser)?)
        } else {
            None
        };
        let Some(table) = self.tables.get_mut(&name) else {
            return Err(engine_error(format!("no such table: {name}")));
        };
        let before = table.rows.len();
        match filter {
            None => table.rows.clear(),
            Some(pairs) => {
                let pairs = resolve_filter(&table.columns, pairs)?;
                table.rows.retain(|row| !matches_filter(row, &pairs));
            }
        }
        Ok(Execution::Affected(RowsAffected {
            rows_affected: (before - table.rows.len()) as u64,
            last_affected_id: None,
        }))
    }

    fn select(&mut self, parser: &mut Parser) -> Result<Execution> {
        let mut items = Vec::new();
        if parser.eat_punct('*') {
            items.push(SelectItem::Star);
        } else {
            loop {
                let column = parser.ident()?.to_ascii_uppercase();
                let alias = if parser.eat_keyword("AS") {
                    Some(parser.ident()?.to_ascii_uppercase())
                } else {
                    None
                };
                items.push(SelectItem::Column { column, alias });
                if !parser.eat_punct(',') {
                    break;
                }
            }
        }
        parser.expect_keyword("FROM")?;
        let name = parser.ident()?.to_ascii_uppercase();
        let filter = if parser.eat_keyword("WHERE") {
            Some(parse_filter(parser)?)
        } else {
            None
        };
        let Some(table) = self.tables.get(&name) else {
            return Err(engine_error(format!("no such table: {name}")));
        };
        let mut projection = Vec::new();
        for item in items {
            match item {
                SelectItem::Star => {
                    projection.extend((0..table.columns.len()).map(|i| (i, None)));
                }
                SelectItem::Column { column, alias } => {
                    let index = column_index(&table.columns, &column)?;
                    projection.push((index, alias));
                }
            }
        }
        let filter = filter
            .map(|pairs| resolve_filter(&table.columns, pairs))
            .transpose()?;
        let rows = table
            .rows
            .iter()
            .filter(|row| match &filter {
                None => true,
                Some(pairs) => matches_filter(row, pairs),
            })
            .map(|row| {
                projection
                    .iter()
                    .map(|(index, _)| row[*index].clone())
                    .collect::<Row>()
            })
            .collect::<Vec<_>>();
        let columns = projection
            .into_iter()
            .map(|(index, alias)| {
                let column = &table.columns[index];
                EngineColumn {
                    label: alias.unwrap_or_else(|| column.name.clone()),
                    name: column.name.clone(),
                    data_type: column.data_type,
                }
            })
            .collect();
        Ok(Execution::ResultSet {
            columns,
            cursor: Box::new(MemoryCursor {
                rows: rows.into_iter(),
            }),
        })
    }
}

enum SelectItem {
    Star,
    Column {
        column: String,
        alias: Option<String>,
    },
}

struct MemoryCursor {
    rows: std::vec::IntoIter<Row>,
}

impl RowCursor for MemoryCursor {
    fn next_row(&mut self) -> Result<Option<Row>> {
        Ok(self.rows.next())
    }
}

fn engine_error(message: impl Into<String>) -> Error {
    Error::Engine(message.into())
}

fn data_type_of(word: &str) -> Result<DataType> {
    Ok(match word {
        "BOOLEAN" | "BOOL" => DataType::Boolean,
        "TINYINT" => DataType::Int8,
        "SMALLINT" => DataType::Int16,
        "INT" | "INTEGER" => DataType::Int32,
        "BIGINT" => DataType::Int64,
        "REAL" => DataType::Float32,
        "FLOAT" | "DOUBLE" => DataType::Float64,
        "DECIMAL" | "NUMERIC" => DataType::Decimal,
        "VARCHAR" | "CHAR" | "TEXT" => DataType::Varchar,
        "BLOB" | "BINARY" => DataType::Blob,
        "DATE" => DataType::Date,
        "TIME" => DataType::Time,
        "TIMESTAMP" => DataType::Timestamp,
        "UUID" => DataType::Uuid,
        other => return Err(engine_error(format!("unsupported column type `{other}`"))),
    })
}

fn column_index(columns: &[Column], name: &str) -> Result<usize> {
    columns
        .iter()
        .position(|column| column.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| engine_error(format!("no such column: {name}")))
}

fn parse_filter(parser: &mut Parser) -> Result<Vec<(String, Value)>> {
    let mut pairs = Vec::new();
    loop {
        let column = parser.ident()?.to_ascii_uppercase();
        parser.expect_punct('=')?;
        pairs.push((column, parser.value()?));
        if !parser.eat_keyword("OR") {
            break;
        }
    }
    Ok(pairs)
}

fn resolve_filter(
    columns: &[Column],
    pairs: Vec<(String, Value)>,
) -> Result<Vec<(usize, Value)>> {
    pairs
        .into_iter()
        .map(|(column, value)| Ok((column_index(columns, &column)?, value)))
        .collect()
}

fn matches_filter(row: &Row, pairs: &[(usize, Value)]) -> bool {
    pairs
        .iter()
        .any(|(index, value)| loosely_eq(&row[*index], value))
}

/// Equality with numeric widening, the way the engine compares a bound
/// value against a stored one.
fn loosely_eq(left: &Value, right: &Value) -> bool {
    if left.is_null() || right.is_null() {
        return false;
    }
    normalize(left) == normalize(right)
}

fn normalize(value: &Value) -> Value {
    match value {
        Value::Int8(Some(v)) => Value::Int64(Some(*v as i64)),
        Value::Int16(Some(v)) => Value::Int64(Some(*v as i64)),
        Value::Int32(Some(v)) => Value::Int64(Some(*v as i64)),
        Value::UInt8(Some(v)) => Value::Int64(Some(*v as i64)),
        Value::UInt16(Some(v)) => Value::Int64(Some(*v as i64)),
        Value::UInt32(Some(v)) => Value::Int64(Some(*v as i64)),
        Value::UInt64(Some(v)) => Value::Int64(Some(*v as i64)),
        Value::Float32(Some(v)) => Value::Float64(Some(*v as f64)),
        other => other.clone(),
    }
}

fn store<T: AsValue>(value: Value, column: &Column) -> Result<Value> {
    T::try_from_value(value)
        .map(AsValue::as_value)
        .map_err(|e| engine_error(format!("column {}: {e}", column.name)))
}

/// Type mismatches surface here, at execution time, as engine errors.
fn coerce(value: Value, column: &Column) -> Result<Value> {
    if value.is_null() {
        return Ok(Value::null_of(column.data_type));
    }
    match column.data_type {
        DataType::Boolean => store::<bool>(value, column),
        DataType::Int8 => store::<i8>(value, column),
        DataType::Int16 => store::<i16>(value, column),
        DataType::Int32 => store::<i32>(value, column),
        DataType::Int64 => store::<i64>(value, column),
        DataType::UInt8 => store::<u8>(value, column),
        DataType::UInt16 => store::<u16>(value, column),
        DataType::UInt32 => store::<u32>(value, column),
        DataType::UInt64 => store::<u64>(value, column),
        DataType::Float32 => store::<f64>(value, column).map(|v| match v {
            Value::Float64(Some(v)) => Value::Float32(Some(v as f32)),
            other => other,
        }),
        DataType::Float64 => store::<f64>(value, column),
        DataType::Varchar => store::<String>(value, column),
        _ => Ok(value),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Number(String),
    Str(String),
    Marker(u32),
    Punct(char),
}

fn tokenize(sql: &str) -> Result<Vec<Token>> {
    let bytes = sql.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_whitespace() {
            i += 1;
        } else if b == b'\'' {
            let mut text = Vec::new();
            i += 1;
            loop {
                match bytes.get(i) {
                    None => return Err(engine_error("unterminated string literal")),
                    Some(b'\'') if bytes.get(i + 1) == Some(&b'\'') => {
                        text.push(b'\'');
                        i += 2;
                    }
                    Some(b'\'') => {
                        i += 1;
                        break;
                    }
                    Some(b) => {
                        text.push(*b);
                        i += 1;
                    }
                }
            }
            let text = String::from_utf8(text)
                .map_err(|_| engine_error("string literal is not valid utf-8"))?;
            tokens.push(Token::Str(text));
        } else if b == b'?' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
            i += 1;
            let mut index = 0u32;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                index = index
                    .checked_mul(10)
                    .and_then(|v| v.checked_add((bytes[i] - b'0') as u32))
                    .ok_or_else(|| engine_error("marker index is out of range"))?;
                i += 1;
            }
            if index == 0 {
                return Err(engine_error("marker index must be positive"));
            }
            tokens.push(Token::Marker(index));
        } else if b.is_ascii_digit() || (b == b'-' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
        {
            let start = i;
            i += 1;
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                i += 1;
            }
            tokens.push(Token::Number(sql[start..i].to_owned()));
        } else if b.is_ascii_alphabetic() || b == b'_' {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            tokens.push(Token::Ident(sql[start..i].to_owned()));
        } else {
            tokens.push(Token::Punct(b as char));
            i += 1;
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    params: &'a [Value],
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn skip(&mut self) -> Result<()> {
        self.next()
            .map(|_| ())
            .ok_or_else(|| engine_error("unexpected end of statement"))
    }

    fn keyword(&mut self) -> Result<String> {
        match self.next() {
            Some(Token::Ident(word)) => Ok(word.to_ascii_uppercase()),
            other => Err(engine_error(format!("expected a keyword, found {other:?}"))),
        }
    }

    fn ident(&mut self) -> Result<String> {
        match self.next() {
            Some(Token::Ident(word)) => Ok(word),
            other => Err(engine_error(format!(
                "expected an identifier, found {other:?}"
            ))),
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        let word = self.keyword()?;
        if word == keyword {
            Ok(())
        } else {
            Err(engine_error(format!("expected {keyword}, found {word}")))
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if matches!(self.peek(), Some(Token::Ident(word)) if word.eq_ignore_ascii_case(keyword)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, punct: char) -> Result<()> {
        match self.next() {
            Some(Token::Punct(c)) if c == punct => Ok(()),
            other => Err(engine_error(format!("expected `{punct}`, found {other:?}"))),
        }
    }

    fn eat_punct(&mut self, punct: char) -> bool {
        if self.peek() == Some(&Token::Punct(punct)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn value(&mut self) -> Result<Value> {
        match self.next() {
            Some(Token::Marker(index)) => self
                .params
                .get(index as usize - 1)
                .cloned()
                .ok_or_else(|| engine_error(format!("missing parameter ?{index}"))),
            Some(Token::Number(text)) => {
                if text.contains('.') {
                    text.parse::<f64>()
                        .map(|v| Value::Float64(Some(v)))
                        .map_err(|_| engine_error(format!("invalid number `{text}`")))
                } else {
                    text.parse::<i64>()
                        .map(|v| Value::Int64(Some(v)))
                        .map_err(|_| engine_error(format!("invalid number `{text}`")))
                }
            }
            Some(Token::Str(text)) => Ok(Value::Varchar(Some(text))),
            Some(Token::Ident(word)) => match word.to_ascii_uppercase().as_str() {
                "NULL" => Ok(Value::Null),
                "TRUE" => Ok(Value::Boolean(Some(true))),
                "FALSE" => Ok(Value::Boolean(Some(false))),
                other => Err(engine_error(format!("unexpected value `{other}`"))),
            },
            other => Err(engine_error(format!("expected a value, found {other:?}"))),
        }
    }
}
