//! Page layout for terminal output: header, main region, footer.
//!
//! The main region starts `top_padding` blank lines below the header rule
//! and indents every child line into a centered band `max_width` columns
//! wide. Child lines are never wrapped, trimmed or dropped; a trailing
//! newline shows up as one final empty line and `\r` is kept as is.

const DEFAULT_TOP_PADDING: usize = 1;
const DEFAULT_MAX_WIDTH: usize = 100;
const DEFAULT_VIEWPORT_WIDTH: usize = 120;

#[derive(Clone, Debug)]
pub struct PublicLayout {
    pub header: String,
    pub footer: String,
    pub top_padding: usize,
    pub max_width: usize,
    pub viewport_width: usize,
}

impl PublicLayout {
    pub fn new(header: &str, footer: &str) -> Self {
        Self {
            header: header.to_string(),
            footer: footer.to_string(),
            top_padding: DEFAULT_TOP_PADDING,
            max_width: DEFAULT_MAX_WIDTH,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
        }
    }

    /// Layout sized to the terminal width in `$COLUMNS`, when set.
    pub fn for_terminal(header: &str, footer: &str) -> Self {
        let layout = Self::new(header, footer);
        match std::env::var("COLUMNS")
            .ok()
            .and_then(|columns| columns.trim().parse::<usize>().ok())
        {
            Some(columns) => layout.with_viewport_width(columns),
            None => layout,
        }
    }

    pub fn with_viewport_width(mut self, viewport_width: usize) -> Self {
        self.viewport_width = viewport_width;
        self
    }

    /// Columns left of the content band. Zero when the band is at least as
    /// wide as the viewport.
    pub fn margin(&self) -> usize {
        self.viewport_width.saturating_sub(self.max_width) / 2
    }

    fn rule(&self) -> String {
        "-".repeat(self.viewport_width)
    }

    pub fn render(&self, children: &str) -> String {
        let margin = " ".repeat(self.margin());
        let mut lines: Vec<String> = self.header.lines().map(str::to_string).collect();
        lines.push(self.rule());
        lines.extend(std::iter::repeat(String::new()).take(self.top_padding));
        lines.extend(children.split('\n').map(|line| format!("{}{}", margin, line)));
        lines.push(self.rule());
        lines.extend(self.footer.lines().map(str::to_string));
        lines.join("\n")
    }
}
