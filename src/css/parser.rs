//! Character-level CSS parser.
//!
//! A six-state machine scans the normalised input once, left to right, with
//! an explicit cursor. Nested constructs (a string inside a function inside a
//! value) push the state to return to on a stack instead of recursing.
//!
//! Malformed input never fails the parse. Every recovery (inferred
//! semicolons, rewritten string newlines, misplaced `@charset`, ...) is
//! recorded in [`Diagnostics`] with the source line it happened on.

use crate::config::Configuration;
use crate::css::chars::{is_escaped, is_token, is_whitespace, ordinary_run, trim_ws};
use crate::css::document::{Document, Token, TokenKind};
use crate::css::model::{Block, BlockId, Child, LineAt, Value};
use crate::css::properties::{at_rule_body, is_known_property, is_valid_property, AtRuleBody};
use crate::css::unicode::{self, EscapeEvent};
use crate::diagnostics::{Component, Diagnostics};
use crate::optimise::values::{
    join_sub_values, normalize_quotes, quote_format, remove_quotes, split_outside_strings,
};
use crate::optimise::{ColorOptimizer, NumberOptimizer};

/// Parser states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Selector,
    Property,
    Value,
    String,
    Bracket,
    AtRule,
}

/// Parse `css` into a [`Document`].
///
/// Never fails; an input that is not CSS at all yields an empty document
/// (see [`Document::is_empty`]).
pub fn parse(css: &str, config: &Configuration, diagnostics: &mut Diagnostics) -> Document {
    Parser::new(css, config, diagnostics).run()
}

/// `\r\n` and `\r` become `\n`; a trailing space flushes whatever is still
/// open at the end of the input.
fn normalise(css: &str) -> Vec<char> {
    let mut chars: Vec<char> = css.replace("\r\n", "\n").replace('\r', "\n").chars().collect();
    chars.push(' ');
    chars
}

struct Parser<'a> {
    chars: Vec<char>,
    i: usize,
    line: usize,
    /// Line the current declaration's value started on.
    value_line: usize,
    config: &'a Configuration,
    diagnostics: &'a mut Diagnostics,
    numbers: NumberOptimizer,
    colors: ColorOptimizer,
    document: Document,

    state: State,
    /// States to return to when the current construct closes.
    from: Vec<State>,
    /// State that was active when the current at-rule's `@` was read.
    at_return: State,
    /// Open blocks, innermost last. The root is never popped.
    blocks: Vec<BlockId>,

    selector: String,
    property: String,
    sub_value: String,
    sub_values: Vec<String>,
    string: String,
    string_end: char,
    /// Keep the current string's quotes.
    quoted_string: bool,
    function: String,
    bracket_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(css: &str, config: &'a Configuration, diagnostics: &'a mut Diagnostics) -> Self {
        let document = Document::new();
        let root = document.root();
        Self {
            chars: normalise(css),
            i: 0,
            line: 1,
            value_line: 1,
            config,
            diagnostics,
            numbers: NumberOptimizer::new(config.convert_unit),
            colors: ColorOptimizer::new(),
            document,
            state: State::Selector,
            from: Vec::new(),
            at_return: State::Selector,
            blocks: vec![root],
            selector: String::new(),
            property: String::new(),
            sub_value: String::new(),
            sub_values: Vec::new(),
            string: String::new(),
            string_end: '"',
            quoted_string: false,
            function: String::new(),
            bracket_depth: 0,
        }
    }

    fn run(mut self) -> Document {
        while self.i < self.chars.len() {
            let c = self.chars[self.i];
            if c == '\n' {
                self.line += 1;
            }
            match self.state {
                State::Selector => self.in_selector(c),
                State::Property => self.in_property(c),
                State::Value => self.in_value(c),
                State::String => self.in_string(c),
                State::Bracket => self.in_bracket(c),
                State::AtRule => self.in_at_rule(c),
            }
            self.i += 1;
        }
        self.finish();
        self.document
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.i + offset).copied()
    }

    fn token_here(&self) -> bool {
        is_token(&self.chars, self.i)
    }

    fn starts_comment(&self) -> bool {
        self.chars[self.i] == '/' && self.peek(1) == Some('*')
    }

    fn preserve(&self) -> bool {
        self.config.preserve_css
    }

    fn current_block(&self) -> BlockId {
        self.blocks.last().copied().unwrap_or(self.document.root())
    }

    fn push_token(&mut self, kind: TokenKind, data: impl Into<String>) {
        if self.preserve() {
            self.document.tokens.push(Token {
                kind,
                data: data.into(),
            });
        }
    }

    fn info(&mut self, text: impl Into<String>) {
        self.diagnostics.info(Component::Parser, self.line, text);
    }

    fn warn(&mut self, text: impl Into<String>) {
        self.diagnostics.warn(Component::Parser, self.line, text);
    }

    /// Take the run of ordinary characters at the cursor, leaving the cursor
    /// on its last character.
    fn take_run(&mut self) -> Option<String> {
        let run = ordinary_run(&self.chars, self.i);
        if run == 0 {
            return None;
        }
        let text: String = self.chars[self.i..self.i + run].iter().collect();
        self.i += run - 1;
        Some(text)
    }

    fn flush_sub_value(&mut self) {
        let trimmed = trim_ws(&self.sub_value);
        if !trimmed.is_empty() {
            self.sub_values.push(trimmed.to_string());
        }
        self.sub_value.clear();
    }

    /// Decode the escape at the cursor and move the cursor past it.
    fn escape(&mut self) -> String {
        let decoded = unicode::decode(&self.chars, self.i, self.config.remove_backslash);
        let consumed = &self.chars[self.i + 1..=decoded.last.max(self.i)];
        self.line += consumed.iter().filter(|&&c| c == '\n').count();
        self.i = decoded.last.max(self.i);
        match decoded.event {
            Some(EscapeEvent::Replaced { escape, with }) => {
                self.info(format!("Replaced unicode notation: changed \\{escape} to {with}"));
            }
            Some(EscapeEvent::RemovedBackslash) => self.info("Removed unnecessary backslash"),
            None => {}
        }
        decoded.text
    }

    /// Consume a `/* ... */` comment starting at the cursor and attach it to
    /// the innermost block. An unterminated comment runs to the end.
    fn comment(&mut self) {
        let start = self.i + 2;
        let end = (start..self.chars.len().saturating_sub(1))
            .find(|&j| self.chars[j] == '*' && self.chars.get(j + 1) == Some(&'/'));
        let text: String = match end {
            Some(j) => {
                let text = self.chars[start..j].iter().collect();
                self.i = j + 1;
                text
            }
            None => {
                let last = self.chars.len().saturating_sub(1).max(start);
                let text = self.chars[start.min(last)..last].iter().collect();
                // leave the sentinel for the main loop
                self.i = last.saturating_sub(1);
                text
            }
        };
        self.line += text.matches('\n').count();
        let block = self.current_block();
        self.document.push_child(block, Child::Comment(text.clone()));
        self.push_token(TokenKind::Comment, text);
    }

    fn begin_string(&mut self, quote: char, return_to: State) {
        self.string = quote.to_string();
        self.string_end = quote;
        self.from.push(return_to);
        self.state = State::String;
    }

    fn pop_block(&mut self) {
        if self.blocks.len() <= 1 {
            return;
        }
        if let Some(id) = self.blocks.pop() {
            let kind = if self.document[id].is_selector() {
                TokenKind::SelectorEnd
            } else {
                TokenKind::AtEnd
            };
            self.push_token(kind, "");
        }
    }

    // -----------------------------------------------------------------------
    // States
    // -----------------------------------------------------------------------

    fn in_selector(&mut self, c: char) {
        if !self.token_here() {
            if let Some(run) = self.take_run() {
                self.selector.push_str(&run);
            } else if is_whitespace(c) {
                if !matches!(self.selector.chars().last(), None | Some(',' | ' ')) {
                    self.selector.push(' ');
                }
            } else {
                self.selector.push(c);
            }
            return;
        }

        match c {
            '/' if self.starts_comment() => self.comment(),
            '{' => self.open_selector(),
            ',' => {
                let trimmed = trim_ws(&self.selector).to_string();
                self.selector = trimmed + ",";
            }
            '@' if trim_ws(&self.selector).is_empty() => {
                self.selector.clear();
                self.at_return = State::Selector;
                self.state = State::AtRule;
            }
            '"' | '\'' => {
                self.quoted_string = self.i > 0 && self.chars[self.i - 1] == '=';
                self.begin_string(c, State::Selector);
            }
            '}' => {
                self.pop_block();
                self.state = self.from.pop().unwrap_or(State::Selector);
                self.selector.clear();
            }
            '\\' => {
                let text = self.escape();
                self.selector.push_str(&text);
            }
            '*' if matches!(self.peek(1), Some('.' | '#' | '[' | ':')) => {
                self.info("Removed redundant universal selector");
            }
            _ => self.selector.push(c),
        }
    }

    fn in_property(&mut self, c: char) {
        if !self.token_here() {
            if let Some(run) = self.take_run() {
                self.property.push_str(&run);
            } else if !is_whitespace(c) {
                self.property.push(c);
            }
            return;
        }

        match c {
            ':' | '=' if !trim_ws(&self.property).is_empty() => {
                self.value_line = self.line;
                self.from.push(State::Property);
                self.state = State::Value;
            }
            '/' if self.starts_comment() => self.comment(),
            '}' => {
                self.pop_block();
                self.state = self.from.pop().unwrap_or(State::Selector);
                self.selector.clear();
                self.property.clear();
            }
            '@' if self.property.is_empty() => {
                self.at_return = State::Property;
                self.state = State::AtRule;
            }
            ';' => self.property.clear(),
            '\\' => {
                let text = self.escape();
                self.property.push_str(&text);
            }
            // property hacks such as `*zoom` or `_height`
            _ if self.property.is_empty() => self.property.push(c),
            _ => {}
        }
    }

    fn in_value(&mut self, c: char) {
        let last = self.i + 1 == self.chars.len();
        let inferred_end = last || (c == '\n' && self.property_is_next(self.i + 1));

        if !self.token_here() && !inferred_end {
            if let Some(run) = self.take_run() {
                self.sub_value.push_str(&run);
            } else if is_whitespace(c) {
                self.flush_sub_value();
            } else {
                self.sub_value.push(c);
            }
            return;
        }

        if !inferred_end {
            match c {
                '/' if self.starts_comment() => self.comment(),
                '"' | '\'' => {
                    self.quoted_string = false;
                    self.begin_string(c, State::Value);
                }
                '(' => {
                    self.function = self.sub_value.clone();
                    self.sub_value.push('(');
                    self.bracket_depth = 1;
                    self.from.push(State::Value);
                    self.state = State::Bracket;
                }
                ',' | '!' => {
                    self.flush_sub_value();
                    self.sub_values.push(c.to_string());
                }
                '\\' => {
                    let text = self.escape();
                    self.sub_value.push_str(&text);
                }
                ';' | '}' => {}
                _ => self.sub_value.push(c),
            }
        }

        if c == ';' || inferred_end {
            self.state = self.from.pop().unwrap_or(State::Property);
        }
        if c == ';' || c == '}' || inferred_end {
            self.commit_declaration();
        }
        if c == '}' && !inferred_end {
            self.pop_block();
            self.from.pop();
            self.state = self.from.pop().unwrap_or(State::Selector);
            self.selector.clear();
        }
    }

    /// Does the text after a newline start with `<known-property>:`?
    fn property_is_next(&mut self, from: usize) -> bool {
        let mut name = String::new();
        let mut found = false;
        for &c in &self.chars[from.min(self.chars.len())..] {
            match c {
                ':' => {
                    found = true;
                    break;
                }
                ';' | '{' | '}' => return false,
                _ => name.push(c),
            }
        }
        if !found {
            return false;
        }
        let name = trim_ws(&name).to_ascii_lowercase();
        if is_known_property(&name) {
            self.warn("Added semicolon to the end of declaration");
            return true;
        }
        false
    }

    fn in_bracket(&mut self, c: char) {
        let escaped = is_escaped(&self.chars, self.i);
        let special = is_whitespace(c) || (!escaped && matches!(c, '"' | '\'' | '(' | ')' | ','));
        if !special {
            match self.take_run() {
                Some(run) => self.sub_value.push_str(&run),
                None => self.sub_value.push(c),
            }
            return;
        }

        match c {
            '"' | '\'' => {
                self.quoted_string = self.function == "format";
                self.begin_string(c, State::Bracket);
                return;
            }
            '(' => self.bracket_depth += 1,
            ')' => self.bracket_depth = self.bracket_depth.saturating_sub(1),
            _ => {}
        }

        let c = if is_whitespace(c) { ' ' } else { c };
        if c == ' ' && matches!(self.sub_value.chars().last(), Some(' ' | ',' | '(')) {
            return;
        }
        if matches!(c, ',' | ')') && self.sub_value.ends_with(' ') {
            self.sub_value.pop();
        }
        self.sub_value.push(c);

        if c == ')' && self.bracket_depth == 0 {
            self.state = self.from.pop().unwrap_or(State::Value);
            self.function.clear();
        }
    }

    fn in_string(&mut self, c: char) {
        let escaped = is_escaped(&self.chars, self.i);
        if c == '\n' && !escaped {
            self.string.push_str("\\A ");
            self.warn("Fixed incorrect newline in string");
            return;
        }
        self.string.push(c);
        if c == self.string_end && !escaped && self.string.chars().count() > 1 {
            self.close_string();
        }
    }

    fn close_string(&mut self) {
        let return_to = self.from.pop().unwrap_or(State::Value);
        self.state = return_to;
        let raw = std::mem::take(&mut self.string);

        let keep_quotes = self.quoted_string
            || matches!(
                trim_ws(&self.property).to_ascii_lowercase().as_str(),
                "content" | "quotes"
            );
        let text = if self.preserve() {
            raw
        } else if keep_quotes {
            normalize_quotes(&raw)
        } else {
            remove_quotes(&raw)
        };
        self.quoted_string = false;

        if return_to == State::Selector {
            self.selector.push_str(&text);
        } else {
            self.sub_value.push_str(&text);
        }
    }

    fn in_at_rule(&mut self, c: char) {
        if !self.token_here() {
            if let Some(run) = self.take_run() {
                self.sub_value.push_str(&run);
            } else if is_whitespace(c) {
                self.flush_sub_value();
            } else {
                self.sub_value.push(c);
            }
            return;
        }

        match c {
            '/' if self.starts_comment() => self.comment(),
            '"' | '\'' => {
                self.quoted_string = true;
                self.begin_string(c, State::AtRule);
            }
            '(' => {
                self.sub_value.push('(');
                self.function = self.sub_value.clone();
                self.bracket_depth = 1;
                self.from.push(State::AtRule);
                self.state = State::Bracket;
            }
            ';' => {
                self.flush_sub_value();
                self.process_at_rule();
                self.sub_values.clear();
                self.state = self.at_return;
            }
            ',' => {
                self.flush_sub_value();
                self.sub_values.push(",".to_string());
            }
            '{' => self.open_at_block(),
            '}' => {
                // unterminated line at-rule: commit it and let the brace
                // close the enclosing block
                self.flush_sub_value();
                self.process_at_rule();
                self.sub_values.clear();
                self.state = self.at_return;
                self.i -= 1;
            }
            '\\' => {
                let text = self.escape();
                self.sub_value.push_str(&text);
            }
            _ => self.sub_value.push(c),
        }
    }

    /// Flush whatever construct the end of input left open.
    fn finish(&mut self) {
        if self.state == State::String {
            self.warn("Unterminated string closed at end of input");
            let trimmed = trim_ws(&self.string).to_string();
            self.string = trimmed;
            // a dangling backslash would escape the closing quote
            let backslashes = self.string.chars().rev().take_while(|&c| c == '\\').count();
            if backslashes % 2 == 1 {
                self.string.pop();
            }
            self.string.push(self.string_end);
            self.close_string();
        }
        if self.state == State::Bracket {
            self.warn("Unclosed parenthesis closed at end of input");
            let closing = ")".repeat(self.bracket_depth.max(1));
            self.sub_value.push_str(&closing);
            self.state = self.from.pop().unwrap_or(State::Value);
        }
        match self.state {
            State::Value => self.commit_declaration(),
            State::AtRule => {
                self.flush_sub_value();
                self.process_at_rule();
                self.sub_values.clear();
            }
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Tree building
    // -----------------------------------------------------------------------

    fn open_selector(&mut self) {
        let mut name = trim_ws(&self.selector).to_string();
        if self.config.lowercase_selectors {
            name = name.to_lowercase();
        }
        self.selector.clear();
        self.from.push(State::Selector);
        self.state = State::Property;

        let parent = self.current_block();
        let id = self.new_selector(parent, name.clone());
        self.blocks.push(id);
        self.push_token(TokenKind::SelectorStart, name);
    }

    /// Find the block a new selector's declarations go into.
    ///
    /// A selector equal to the previous sibling selector reuses it; in
    /// [`crate::config::SelectorMerge::All`] mode any same-named sibling is
    /// reused. Nothing is folded when CSS is preserved.
    fn new_selector(&mut self, parent: BlockId, name: String) -> BlockId {
        if !self.preserve() {
            let previous = self.document[parent]
                .children
                .iter()
                .rev()
                .find(|child| !matches!(child, Child::Comment(_)));
            if let Some(&Child::Block(id)) = previous {
                let block = &self.document[id];
                if block.is_selector() && block.name == name {
                    return id;
                }
            }
            if self.config.merge_selectors == crate::config::SelectorMerge::All {
                let existing = self
                    .document
                    .child_blocks(parent)
                    .into_iter()
                    .find(|&id| self.document[id].is_selector() && self.document[id].name == name);
                if let Some(id) = existing {
                    return id;
                }
            }
        }

        let fragments = split_outside_strings(',', &name)
            .iter()
            .map(|fragment| trim_ws(fragment).to_string())
            .filter(|fragment| !fragment.is_empty())
            .collect();
        self.document.add_block(parent, Block::selector(name, fragments))
    }

    fn open_at_block(&mut self) {
        self.flush_sub_value();
        let name = format!("@{}", join_sub_values(&self.sub_values));
        let next = self.next_parser();
        self.from.push(self.at_return);
        self.state = next;

        let parent = self.current_block();
        let id = self.document.add_block(parent, Block::at_block(name.clone()));
        self.blocks.push(id);
        self.push_token(TokenKind::AtStart, name);
        self.sub_values.clear();
    }

    /// Decide whether an at-block body holds rules or declarations.
    fn next_parser(&self) -> State {
        match self.sub_values.first().and_then(|name| at_rule_body(name)) {
            Some(AtRuleBody::Declarations) => return State::Property,
            Some(AtRuleBody::Rules) => return State::Selector,
            None => {}
        }
        let find = |wanted: char| {
            (self.i + 1..self.chars.len())
                .find(|&j| self.chars[j] == wanted && !is_escaped(&self.chars, j))
        };
        match (find(':'), find('{')) {
            (None, _) => State::Selector,
            (Some(_), None) => State::Property,
            (Some(colon), Some(curly)) if colon < curly => State::Property,
            _ => State::Selector,
        }
    }

    fn process_at_rule(&mut self) {
        let parts: Vec<String> = self
            .sub_values
            .iter()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect();
        let Some(first) = parts.first() else {
            return;
        };
        let rule = first.to_ascii_lowercase();
        let rest = join_sub_values(&parts[1..]);
        let root = self.document.root();
        let root_has_blocks = !self.document.child_blocks(root).is_empty();

        match rule.as_str() {
            "charset" => {
                if self.document.charset.is_some() {
                    self.warn("Only one @charset may be in document, later one is ignored");
                    return;
                }
                if root_has_blocks
                    || !self.document.imports.is_empty()
                    || !self.document.namespaces.is_empty()
                {
                    self.warn("@charset must be before anything");
                }
                self.document.charset = Some(rest);
            }
            "namespace" => {
                if root_has_blocks {
                    self.warn("@namespace must be before selectors");
                }
                self.document.namespaces.push(rest);
            }
            "import" => {
                if self.blocks.len() > 1 {
                    self.warn("@import cannot be inside @media");
                } else if root_has_blocks {
                    self.warn("@import must be before any selectors");
                }
                self.document.imports.push(LineAt {
                    name: "import".to_string(),
                    value: rest,
                });
            }
            _ => {
                let rule = LineAt {
                    name: first.clone(),
                    value: rest,
                };
                self.push_token(TokenKind::LineAt, rule.to_string());
                let block = self.current_block();
                self.document.push_child(block, Child::LineAt(rule));
            }
        }
    }

    fn commit_declaration(&mut self) {
        self.flush_sub_value();
        let property = trim_ws(&self.property).to_ascii_lowercase();
        let mut sub_values = std::mem::take(&mut self.sub_values);
        self.property.clear();
        if property.is_empty() {
            return;
        }
        if self.blocks.len() <= 1 {
            self.warn(format!("Dropped declaration outside of a block: {property}"));
            return;
        }

        let important = matches!(
            sub_values.as_slice(),
            [.., bang, word] if bang == "!" && word.eq_ignore_ascii_case("important")
        );
        if important {
            sub_values.truncate(sub_values.len() - 2);
        }

        let mut parts = Vec::with_capacity(sub_values.len());
        for sub in sub_values {
            if sub == "," || sub == "!" {
                parts.push(sub);
                continue;
            }
            let mut sub = sub;
            if !self.preserve() {
                let line = self.value_line;
                sub = self.colors.optimise(&property, &sub, line, self.diagnostics);
                sub = self.numbers.optimise(&property, &sub, line, self.diagnostics);
            }
            if let Some(quoted) = quote_format(&sub) {
                sub = quoted;
            }
            parts.push(sub);
        }

        let text = join_sub_values(&parts);
        if text.is_empty() {
            self.info(format!("Removed empty declaration: {property}"));
            return;
        }
        if !self.preserve() && !is_valid_property(&property, self.config.css_level) {
            if self.config.discard_invalid_properties {
                self.warn(format!("Removed invalid property: {property}"));
                return;
            }
            let level = self.config.css_level.as_str();
            self.warn(format!("Invalid property in {level}: {property}"));
        }

        let value = Value { text, important };
        self.push_token(TokenKind::Property, property.clone());
        self.push_token(TokenKind::Value, value.to_string());
        let block = self.current_block();
        self.document[block].declarations.insert(property, value);
    }
}
