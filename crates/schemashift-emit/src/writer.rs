/// Line-oriented source buffer with four-space indentation.
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
    out: String,
    depth: usize,
}

impl SourceWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str("    ");
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Write `open`, then indent until the matching [`SourceWriter::close`].
    pub(crate) fn open(&mut self, open: impl AsRef<str>) {
        self.line(open);
        self.line("{");
        self.depth += 1;
    }

    pub(crate) fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    /// Open `namespace <name>` when a namespace is configured.
    pub(crate) fn open_namespace(&mut self, namespace: Option<&str>) {
        if let Some(namespace) = namespace {
            self.open(format!("namespace {namespace}"));
        }
    }

    pub(crate) fn close_namespace(&mut self, namespace: Option<&str>) {
        if namespace.is_some() {
            self.close();
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nests_blocks() {
        let mut w = SourceWriter::new();
        w.open_namespace(Some("Hr"));
        w.open("class A");
        w.line("int X;");
        w.blank();
        w.close();
        w.close_namespace(Some("Hr"));

        assert_eq!(
            w.finish(),
            "namespace Hr\n{\n    class A\n    {\n        int X;\n\n    }\n}\n"
        );
    }
}
