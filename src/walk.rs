//! Depth-first traversal of schema elements.
//!
//! The children of a class are its sub classes followed by its
//! individuals, each in key order. Other elements have no children.
//!
//! The callback receives each element and its depth below the root.
//! Returning `false` skips the children of that element; the walk
//! carries on with its siblings. Every element is visited at most
//! once, even when it is reachable along several paths. A class and an
//! individual sharing a key are different elements.
use crate::key::ElementKey;
use crate::model::{Element, ElementKind};
use crate::schema::OwlSchema;

use std::collections::BTreeSet;

fn children<'a>(schema: &'a OwlSchema, element: Element<'a>) -> Vec<Element<'a>> {
    match element {
        Element::Class(class) => class
            .sub_classes()
            .iter()
            .filter_map(|k| schema.owl_class(k).map(Element::Class))
            .chain(
                class
                    .individuals()
                    .iter()
                    .filter_map(|k| schema.individual(k).map(Element::Individual)),
            )
            .collect(),
        Element::Property(_) | Element::Individual(_) | Element::Datatype(_) => Vec::new(),
    }
}

fn walk_from<'a, F>(
    schema: &'a OwlSchema,
    root: Element<'a>,
    seen: &mut BTreeSet<(ElementKind, &'a ElementKey)>,
    callback: &mut F,
) -> usize
where
    F: FnMut(Element<'a>, usize) -> bool,
{
    let mut count = 0;
    let mut stack = vec![(root, 0)];

    while let Some((element, depth)) = stack.pop() {
        if !seen.insert((element.kind(), element.key())) {
            continue;
        }
        count += 1;

        if callback(element, depth) {
            // Reversed so that children pop in key order.
            for child in children(schema, element).into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }
    count
}

/// Walk the tree below `root`. Returns the number of elements visited.
pub fn walk<'a, F>(schema: &'a OwlSchema, root: Element<'a>, mut callback: F) -> usize
where
    F: FnMut(Element<'a>, usize) -> bool,
{
    let mut seen = BTreeSet::new();
    walk_from(schema, root, &mut seen, &mut callback)
}

/// Walk the whole class hierarchy, starting from each top level class.
pub fn walk_hierarchy<'a, F>(schema: &'a OwlSchema, mut callback: F) -> usize
where
    F: FnMut(Element<'a>, usize) -> bool,
{
    let mut seen = BTreeSet::new();
    schema
        .top_level_classes()
        .into_iter()
        .map(|c| walk_from(schema, Element::Class(c), &mut seen, &mut callback))
        .sum()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{Individual, Named};
    use pretty_assertions::assert_eq;

    const NS: &str = "http://www.example.com/onto#";

    fn key(s: &str) -> ElementKey {
        ElementKey::new(NS, s)
    }

    fn tree() -> OwlSchema {
        let mut s = OwlSchema::default();
        for c in &["Animal", "Bird", "Cat", "Sparrow", "Rock"] {
            s.declare_class(key(c));
        }
        s.add_super_class(&key("Bird"), &key("Animal"));
        s.add_super_class(&key("Cat"), &key("Animal"));
        s.add_super_class(&key("Sparrow"), &key("Bird"));
        s.add_individual(Individual::new(key("tom")));
        s.add_class_assertion(&key("tom"), &key("Cat"));
        s.finish_load();
        s
    }

    #[test]
    fn test_walk_order_and_depth() {
        let s = tree();
        let animal = Element::Class(s.owl_class(&key("Animal")).unwrap());

        let mut seen = Vec::new();
        let count = walk(&s, animal, |e, depth| {
            seen.push(format!("{}{}", " ".repeat(depth), e.named().name()));
            true
        });
        assert_eq!(count, 5);
        assert_eq!(seen, vec!["Animal", " Bird", "  Sparrow", " Cat", "  tom"]);
    }

    #[test]
    fn test_stop_descending() {
        let s = tree();
        let animal = Element::Class(s.owl_class(&key("Animal")).unwrap());

        let mut seen = Vec::new();
        walk(&s, animal, |e, _| {
            seen.push(e.named().name().to_string());
            e.named().name() != "Bird"
        });
        assert_eq!(seen, vec!["Animal", "Bird", "Cat", "tom"]);
    }

    #[test]
    fn test_punned_individual_is_visited() {
        let mut s = tree();
        s.add_individual(Individual::new(key("Sparrow")));
        s.add_class_assertion(&key("Sparrow"), &key("Bird"));
        s.finish_load();
        let bird = Element::Class(s.owl_class(&key("Bird")).unwrap());

        let mut seen = Vec::new();
        let count = walk(&s, bird, |e, _| {
            seen.push((e.kind(), e.named().name().to_string()));
            true
        });
        assert_eq!(count, 3);
        assert_eq!(
            seen,
            vec![
                (ElementKind::Class, "Bird".to_string()),
                (ElementKind::Class, "Sparrow".to_string()),
                (ElementKind::Individual, "Sparrow".to_string()),
            ]
        );
    }

    #[test]
    fn test_walk_hierarchy_visits_once() {
        let mut s = tree();
        s.declare_class(key("Pet"));
        s.add_super_class(&key("Cat"), &key("Pet"));
        s.finish_load();

        let mut seen = Vec::new();
        let count = walk_hierarchy(&s, |e, _| {
            seen.push(e.named().name().to_string());
            true
        });
        assert_eq!(count, 7);
        assert_eq!(seen.iter().filter(|n| *n == "Cat").count(), 1);
        assert_eq!(seen.last().map(String::as_str), Some("Rock"));
    }
}
