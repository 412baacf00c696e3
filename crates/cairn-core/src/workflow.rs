// Rust guideline compliant 2026-07-30

//! Workflow engine: the status state machine parsed from a small
//! diagram DSL.
//!
//! The DSL is a line-oriented state-diagram subset. A tokenizer classifies
//! each line after stripping trailing `%%` comments and semicolons; a
//! builder folds the classified lines into the transition graph. A missing
//! or unparsable workflow file yields a fixed three-state fallback, so
//! callers always get a usable workflow.

use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Visual style registered by a `classDef` line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Display palette a state's style color buckets into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Red,
    Yellow,
    Green,
    Cyan,
    Blue,
    Magenta,
    /// Neutral; used when no color is defined or it cannot be parsed.
    Gray,
}

/// A parsed status workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    states: Vec<String>,
    transitions: HashMap<String, Vec<String>>,
    initial: String,
    class_styles: HashMap<String, ClassStyle>,
    state_classes: HashMap<String, String>,
    transition_labels: HashMap<String, String>,
}

/// One classified DSL line.
#[derive(Debug, Clone, PartialEq)]
enum Line {
    /// `state "<Label>" as <id>`
    StateAlias { alias: String, label: String },
    /// `classDef <name> key:value, ...`
    ClassDef { name: String, style: ClassStyle },
    /// `class <id1,id2,...> <className>`
    ClassAssign { states: Vec<String>, class: String },
    /// `[*] --> <state>`
    Initial { state: String },
    /// `<from> --> <to>[: <label>]`
    Transition {
        from: String,
        to: String,
        label: Option<String>,
    },
    /// Anything else, including blanks, headers, and terminal markers.
    Other,
}

/// Strips a trailing `%%` comment and semicolons, then classifies.
fn tokenize_line(raw: &str) -> Line {
    let uncommented = match raw.find("%%") {
        Some(idx) => &raw[..idx],
        None => raw,
    };
    let line = uncommented.trim().trim_end_matches(';').trim_end();

    if line.is_empty() {
        return Line::Other;
    }

    if let Some(rest) = line.strip_prefix("state ") {
        return tokenize_state_alias(rest).unwrap_or(Line::Other);
    }
    if let Some(rest) = line.strip_prefix("classDef ") {
        return tokenize_class_def(rest).unwrap_or(Line::Other);
    }
    if let Some(rest) = line.strip_prefix("class ") {
        return tokenize_class_assign(rest).unwrap_or(Line::Other);
    }

    if let Some((lhs, rhs)) = line.split_once("-->") {
        let from = lhs.trim();
        let (to, label) = match rhs.split_once(':') {
            Some((to, label)) => (to.trim(), Some(label.trim().to_string())),
            None => (rhs.trim(), None),
        };

        if from.is_empty() || to.is_empty() || to == "[*]" {
            // `x --> [*]` terminal markers carry no transition.
            return Line::Other;
        }
        if from == "[*]" {
            return Line::Initial {
                state: to.to_string(),
            };
        }
        return Line::Transition {
            from: from.to_string(),
            to: to.to_string(),
            label: label.filter(|l| !l.is_empty()),
        };
    }

    Line::Other
}

fn tokenize_state_alias(rest: &str) -> Option<Line> {
    let rest = rest.trim_start();
    let quoted = rest.strip_prefix('"')?;
    let end = quoted.find('"')?;
    let label = &quoted[..end];
    let alias = quoted[end + 1..].trim().strip_prefix("as")?.trim();

    if label.is_empty() || alias.is_empty() || alias.contains(char::is_whitespace) {
        return None;
    }

    Some(Line::StateAlias {
        alias: alias.to_string(),
        label: label.to_string(),
    })
}

fn tokenize_class_def(rest: &str) -> Option<Line> {
    let (name, attrs) = rest.trim().split_once(char::is_whitespace)?;
    let mut style = ClassStyle::default();

    for pair in attrs.split(',') {
        let Some((key, value)) = pair.split_once(':') else {
            continue;
        };
        let value = value.trim().to_string();
        match key.trim() {
            "fill" => style.fill = Some(value),
            "stroke" => style.stroke = Some(value),
            "color" => style.color = Some(value),
            "icon" => style.icon = Some(value),
            _ => {}
        }
    }

    Some(Line::ClassDef {
        name: name.to_string(),
        style,
    })
}

fn tokenize_class_assign(rest: &str) -> Option<Line> {
    let mut parts: Vec<&str> = rest.split_whitespace().collect();
    if parts.len() < 2 {
        return None;
    }

    let class = parts.pop()?.to_string();
    let states: Vec<String> = parts
        .join("")
        .split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if states.is_empty() {
        return None;
    }

    Some(Line::ClassAssign { states, class })
}

/// Accumulates classified lines into a [`Workflow`].
#[derive(Debug, Default)]
struct Builder {
    aliases: HashMap<String, String>,
    states: Vec<String>,
    transitions: HashMap<String, Vec<String>>,
    initial: Option<String>,
    class_styles: HashMap<String, ClassStyle>,
    state_classes: HashMap<String, String>,
    transition_labels: HashMap<String, String>,
}

impl Builder {
    fn resolve(&self, name: &str) -> String {
        self.aliases
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    /// Registers a state the first time it is seen, preserving order.
    fn touch_state(&mut self, name: &str) {
        if !self.states.iter().any(|s| s == name) {
            self.states.push(name.to_string());
        }
    }

    fn apply(&mut self, line: Line) {
        match line {
            Line::StateAlias { alias, label } => {
                self.touch_state(&label);
                self.aliases.insert(alias, label);
            }
            Line::ClassDef { name, style } => {
                self.class_styles.insert(name, style);
            }
            Line::ClassAssign { states, class } => {
                for state in states {
                    let resolved = self.resolve(&state);
                    self.touch_state(&resolved);
                    self.state_classes.insert(resolved, class.clone());
                }
            }
            Line::Initial { state } => {
                let resolved = self.resolve(&state);
                self.touch_state(&resolved);
                // The first [*] declaration wins.
                if self.initial.is_none() {
                    self.initial = Some(resolved);
                }
            }
            Line::Transition { from, to, label } => {
                let from = self.resolve(&from);
                let to = self.resolve(&to);
                self.touch_state(&from);
                self.touch_state(&to);

                if let Some(label) = label {
                    self.transition_labels
                        .insert(format!("{}->{}", from, to), label);
                }

                let targets = self.transitions.entry(from).or_default();
                if !targets.contains(&to) {
                    targets.push(to);
                }
            }
            Line::Other => {}
        }
    }

    fn finish(self) -> crate::Result<Workflow> {
        let initial = match self.initial {
            Some(initial) => initial,
            None => self
                .states
                .first()
                .cloned()
                .ok_or_else(|| crate::Error::Parse("Workflow declares no states".to_string()))?,
        };

        Ok(Workflow {
            states: self.states,
            transitions: self.transitions,
            initial,
            class_styles: self.class_styles,
            state_classes: self.state_classes,
            transition_labels: self.transition_labels,
        })
    }
}

impl Workflow {
    /// Parses workflow DSL text.
    ///
    /// Unrecognized lines are ignored; aliases are resolved wherever states
    /// are referenced. When no `[*]` line is present the first declared
    /// state is the initial state.
    ///
    /// # Errors
    ///
    /// Returns a parse error when the text declares no states at all.
    pub fn parse(text: &str) -> crate::Result<Self> {
        let mut builder = Builder::default();
        for raw in text.lines() {
            builder.apply(tokenize_line(raw));
        }
        builder.finish()
    }

    /// Loads the workflow file at `path`, falling back to
    /// [`Workflow::fallback`] when the file is missing or unparsable.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text).unwrap_or_else(|_| Self::fallback()),
            Err(_) => Self::fallback(),
        }
    }

    /// The fixed fallback workflow: open → active → closed → open.
    pub fn fallback() -> Self {
        let text = Self::fallback_dsl();
        Self::parse(text).unwrap_or_else(|_| unreachable!("fallback DSL is well-formed"))
    }

    /// The fallback workflow rendered as DSL text, suitable for seeding a
    /// fresh workflow file.
    pub fn fallback_dsl() -> &'static str {
        "[*] --> open\n\
         open --> active: start\n\
         active --> closed: resolve\n\
         closed --> open: reopen\n\
         classDef openState color:#84cc16\n\
         classDef activeState color:#eab308\n\
         class open openState\n\
         class active activeState\n"
    }

    /// Ordered unique state list, in first-seen order.
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// The initial state.
    pub fn initial(&self) -> &str {
        &self.initial
    }

    /// Returns whether `state` is declared.
    pub fn has_state(&self, state: &str) -> bool {
        self.states.iter().any(|s| s == state)
    }

    /// Direct transition targets of `state`, in declaration order.
    pub fn transitions_from(&self, state: &str) -> &[String] {
        self.transitions
            .get(state)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Label of the `from --> to` transition, when one was declared.
    pub fn transition_label(&self, from: &str, to: &str) -> Option<&str> {
        self.transition_labels
            .get(&format!("{}->{}", from, to))
            .map(String::as_str)
    }

    /// Legal next states from `current`: the current state itself (a no-op
    /// choice is always allowed) followed by its unique transition targets.
    pub fn allowed_next(&self, current: &str) -> Vec<String> {
        let mut next = vec![current.to_string()];
        for target in self.transitions_from(current) {
            if !next.contains(target) {
                next.push(target.clone());
            }
        }
        next
    }

    /// States that count as closed.
    ///
    /// A declared `closed` state is authoritative; otherwise every state
    /// with zero outgoing transitions counts, and when no such sink exists
    /// nothing is considered closed.
    pub fn closed_states(&self) -> Vec<String> {
        if self.has_state("closed") {
            return vec!["closed".to_string()];
        }

        self.states
            .iter()
            .filter(|state| self.transitions_from(state).is_empty())
            .cloned()
            .collect()
    }

    /// All states minus the closed ones, in declaration order.
    pub fn open_states(&self) -> Vec<String> {
        let closed = self.closed_states();
        self.states
            .iter()
            .filter(|state| !closed.contains(state))
            .cloned()
            .collect()
    }

    /// Returns whether `state` counts as closed.
    pub fn is_closed(&self, state: &str) -> bool {
        self.closed_states().iter().any(|s| s == state)
    }

    /// Lowercases a raw status value, mapping the legacy tokens
    /// `in_progress` / `in-progress` to `active` when `active` is declared
    /// and the legacy token itself is not.
    pub fn normalize_status(&self, raw: &str) -> String {
        let lowered = raw.trim().to_lowercase();
        let legacy = lowered == "in_progress" || lowered == "in-progress";
        if legacy && self.has_state("active") && !self.has_state(&lowered) {
            return "active".to_string();
        }
        lowered
    }

    /// Style of `state`, resolved through its class assignment.
    pub fn style_for(&self, state: &str) -> Option<&ClassStyle> {
        let class = self.state_classes.get(state)?;
        self.class_styles.get(class)
    }

    /// Buckets a state's style color into the display palette.
    ///
    /// The effective color is `color`, else `stroke`, else `fill`. Hex
    /// values (`#rgb` or `#rrggbb`) are converted to a hue and bucketed
    /// into half-open degree ranges: [15, 55) yellow, [55, 90) green,
    /// [90, 170) cyan, [170, 250) blue, [250, 320) magenta, otherwise red.
    /// No style, an unparsable value, or a zero-saturation color is
    /// neutral gray.
    pub fn status_color(&self, state: &str) -> StatusColor {
        let Some(style) = self.style_for(state) else {
            return StatusColor::Gray;
        };
        let Some(hex) = style
            .color
            .as_deref()
            .or(style.stroke.as_deref())
            .or(style.fill.as_deref())
        else {
            return StatusColor::Gray;
        };
        match parse_hex(hex) {
            Some((r, g, b)) => hue_bucket(r, g, b),
            None => StatusColor::Gray,
        }
    }
}

fn parse_hex(value: &str) -> Option<(u8, u8, u8)> {
    let digits = value.trim().strip_prefix('#')?;

    match digits.len() {
        3 => {
            let mut channels = [0u8; 3];
            for (i, ch) in digits.chars().enumerate() {
                let nibble = ch.to_digit(16)? as u8;
                channels[i] = nibble * 17;
            }
            Some((channels[0], channels[1], channels[2]))
        }
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

fn hue_bucket(r: u8, g: u8, b: u8) -> StatusColor {
    let rf = f32::from(r);
    let gf = f32::from(g);
    let bf = f32::from(b);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    if delta == 0.0 {
        return StatusColor::Gray;
    }

    let mut hue = if max == rf {
        60.0 * ((gf - bf) / delta)
    } else if max == gf {
        60.0 * ((bf - rf) / delta + 2.0)
    } else {
        60.0 * ((rf - gf) / delta + 4.0)
    };
    if hue < 0.0 {
        hue += 360.0;
    }

    match hue {
        h if (15.0..55.0).contains(&h) => StatusColor::Yellow,
        h if (55.0..90.0).contains(&h) => StatusColor::Green,
        h if (90.0..170.0).contains(&h) => StatusColor::Cyan,
        h if (170.0..250.0).contains(&h) => StatusColor::Blue,
        h if (250.0..320.0).contains(&h) => StatusColor::Magenta,
        _ => StatusColor::Red,
    }
}
