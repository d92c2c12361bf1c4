use color_print::ceprintln;
use minic::grammer::token::Pos;

#[derive(Debug)]
pub enum Msg {
    Error(String),
    Warn(String),
    Note(String),
}

/// Named source text, used to quote the offending line.
pub struct Source<'a> {
    pub name: &'a str,
    pub text: &'a str,
}

impl Msg {
    pub fn print(&self, at: Option<(&Source, Pos)>) {
        match self {
            Msg::Error(msg) => ceprintln!("<red,bold>error</>: {}", msg),
            Msg::Warn(msg) => ceprintln!("<yellow,bold>warn</>: {}", msg),
            Msg::Note(msg) => ceprintln!("<green,bold>note</>: {}", msg),
        }
        if let Some((src, pos)) = at {
            let raw = src.text.lines().nth(pos.line.saturating_sub(1)).unwrap_or("");
            let caret = " ".repeat(pos.col.saturating_sub(1));
            ceprintln!("     <blue>--></> <underline>{}:{}:{}</>", src.name, pos.line, pos.col);
            ceprintln!("      <blue>|</>");
            ceprintln!(" <blue>{:>4} |</> {}", pos.line, raw);
            ceprintln!("      <blue>|</> {}<red,bold>^</>", caret);
        }
    }
}
