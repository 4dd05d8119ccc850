use mcms_menu::{DefinitionParser, VisibilityContext};
use mcms_test_utils::site_url;
use proptest::prelude::*;

fn definition(hyphens: &[usize]) -> String {
    hyphens
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{}Item {}|item{}", "-".repeat(*h), i, i))
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    #[test]
    fn prop_every_line_becomes_a_node(hyphens in proptest::collection::vec(0..5usize, 0..30)) {
        let parser = DefinitionParser::new(site_url());
        let tree = parser.parse(&definition(&hyphens), &VisibilityContext::unrestricted());

        prop_assert_eq!(tree.node_count(), hyphens.len());
    }

    #[test]
    fn prop_nesting_never_skips_a_level(hyphens in proptest::collection::vec(0..5usize, 1..30)) {
        let parser = DefinitionParser::new(site_url());
        let tree = parser.parse(&definition(&hyphens), &VisibilityContext::unrestricted());

        let mut previous = 0;
        for (i, h) in hyphens.iter().enumerate() {
            let node = tree.find_by_identifier(&format!("item{i}")).unwrap();
            let depth = tree.depth(node);

            // Deeper than written never; deeper than one below the previous line never.
            prop_assert!(depth <= h + 1);
            prop_assert!(depth <= previous + 1);
            if *h == 0 {
                prop_assert_eq!(depth, 1);
            }
            previous = depth;
        }
    }

    #[test]
    fn prop_siblings_follow_line_order(hyphens in proptest::collection::vec(0..3usize, 0..30)) {
        let parser = DefinitionParser::new(site_url());
        let tree = parser.parse(&definition(&hyphens), &VisibilityContext::unrestricted());

        for node in tree.pre_order() {
            let sorts: Vec<i64> = tree.children(node).iter().map(|c| tree.item(*c).sort()).collect();
            prop_assert!(sorts.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

#[test]
fn hyphen_only_label_is_a_divider() {
    let parser = DefinitionParser::new(site_url());
    let tree = parser.parse("Section|s\n-###\n-Item|i", &VisibilityContext::unrestricted());

    let section = tree.find_by_identifier("s").unwrap();
    let divider = tree.children(section)[0];
    assert!(tree.item(divider).is_divider());
    assert!(tree.export().children[0].children[0].divider);
}
