use super::compiler::WhereCompiler;
use super::item::WhereItem;
use std::fmt;

/// Renders a condition tree as an indented outline for debugging and the CLI.
pub struct DisplayWhereTree<'a> {
    pub items: &'a [WhereItem],
    pub compiler: &'a WhereCompiler,
}

impl<'a> fmt::Display for DisplayWhereTree<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return writeln!(f, "(empty)");
        }
        self.fmt_items(self.items, f, "")
    }
}

impl<'a> DisplayWhereTree<'a> {
    fn fmt_items(&self, items: &[WhereItem], f: &mut fmt::Formatter<'_>, prefix: &str) -> fmt::Result {
        for (index, item) in items.iter().enumerate() {
            let is_last = index + 1 == items.len();
            let marker = if is_last { "└── " } else { "├── " };
            let connective = match item.logical_op() {
                Some(op) if index > 0 => format!("{} ", op),
                _ => String::new(),
            };
            write!(f, "{}{}{}", prefix, marker, connective)?;

            match item {
                WhereItem::Condition(_) => {
                    let rendered = self.compiler.compile(std::slice::from_ref(item));
                    if rendered.is_empty() {
                        writeln!(f, "<incomplete condition {}>", item.id())?;
                    } else {
                        writeln!(f, "{}", rendered)?;
                    }
                }
                WhereItem::Group(group) => {
                    writeln!(f, "Group {}", group.id)?;
                    let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
                    self.fmt_items(&group.children, f, &child_prefix)?;
                }
            }
        }
        Ok(())
    }
}
