use mailblocks_model::{Column, Content, Row, Template};

/// Visitor pattern for traversing a template immutably
///
/// Default implementations walk the whole tree in document order.
/// Override specific visit_* methods to act on nodes.
pub trait Visitor: Sized {
    fn visit_template(&mut self, template: &Template) {
        walk_template(self, template);
    }

    fn visit_row(&mut self, row: &Row) {
        walk_row(self, row);
    }

    fn visit_column(&mut self, column: &Column) {
        walk_column(self, column);
    }

    fn visit_content(&mut self, _content: &Content) {
        // Leaf node, no children to walk
    }
}

/// Mutable visitor for rewriting a template in place
pub trait VisitorMut: Sized {
    fn visit_template_mut(&mut self, template: &mut Template) {
        walk_template_mut(self, template);
    }

    fn visit_row_mut(&mut self, row: &mut Row) {
        walk_row_mut(self, row);
    }

    fn visit_column_mut(&mut self, column: &mut Column) {
        walk_column_mut(self, column);
    }

    fn visit_content_mut(&mut self, _content: &mut Content) {
        // Leaf node, no children to walk
    }
}

pub fn walk_template<V: Visitor>(visitor: &mut V, template: &Template) {
    for row in &template.body.rows {
        visitor.visit_row(row);
    }
}

pub fn walk_row<V: Visitor>(visitor: &mut V, row: &Row) {
    for column in &row.columns {
        visitor.visit_column(column);
    }
}

pub fn walk_column<V: Visitor>(visitor: &mut V, column: &Column) {
    for content in &column.contents {
        visitor.visit_content(content);
    }
}

pub fn walk_template_mut<V: VisitorMut>(visitor: &mut V, template: &mut Template) {
    for row in &mut template.body.rows {
        visitor.visit_row_mut(row);
    }
}

pub fn walk_row_mut<V: VisitorMut>(visitor: &mut V, row: &mut Row) {
    for column in &mut row.columns {
        visitor.visit_column_mut(column);
    }
}

pub fn walk_column_mut<V: VisitorMut>(visitor: &mut V, column: &mut Column) {
    for content in &mut column.contents {
        visitor.visit_content_mut(content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailblocks_model::{ContentType, IDGenerator, Palette};

    #[derive(Default)]
    struct Counter {
        rows: usize,
        columns: usize,
        contents: usize,
    }

    impl Visitor for Counter {
        fn visit_row(&mut self, row: &Row) {
            self.rows += 1;
            walk_row(self, row);
        }

        fn visit_column(&mut self, column: &Column) {
            self.columns += 1;
            walk_column(self, column);
        }

        fn visit_content(&mut self, _content: &Content) {
            self.contents += 1;
        }
    }

    struct ResetPadding;

    impl VisitorMut for ResetPadding {
        fn visit_content_mut(&mut self, content: &mut Content) {
            content.values.common_mut().container_padding = "0px".to_string();
        }
    }

    fn sample() -> Template {
        let mut ids = IDGenerator::from_seed("v");
        let palette = Palette::default();
        let mut template = Template::blank(&mut ids);
        for _ in 0..2 {
            let mut row = Row::new(&mut ids);
            row.columns[0]
                .contents
                .push(palette.instantiate(ContentType::Text, &mut ids));
            template.body.rows.push(row);
        }
        template
    }

    #[test]
    fn test_visitor_walks_every_node() {
        let mut counter = Counter::default();
        counter.visit_template(&sample());

        assert_eq!(counter.rows, 2);
        assert_eq!(counter.columns, 2);
        assert_eq!(counter.contents, 2);
    }

    #[test]
    fn test_visitor_mut_rewrites_leaves() {
        let mut template = sample();
        ResetPadding.visit_template_mut(&mut template);

        for content in mailblocks_model::contents(&template) {
            assert_eq!(content.values.common().container_padding, "0px");
        }
    }
}
