use std::collections::HashMap;

use multibar_graph::core::CompiledExpression;
use proptest::prelude::*;

proptest! {
    #[test]
    fn evaluation_never_panics_property(text in ".{0,64}") {
        let expr = CompiledExpression::compile(&text);
        let result = expr.evaluate(&HashMap::new());
        prop_assert!(!result.is_nan());
    }

    #[test]
    fn addition_matches_reference_property(
        a in -1.0e9f64..1.0e9,
        b in -1.0e9f64..1.0e9
    ) {
        let expr = CompiledExpression::compile("{x}+{y}");
        let values = HashMap::from([("{x}", Some(a)), ("{y}", Some(b))]);
        prop_assert_eq!(expr.evaluate(&values), a + b);
    }

    #[test]
    fn grouped_arithmetic_matches_reference_property(
        a in -1.0e6f64..1.0e6,
        b in -1.0e6f64..1.0e6,
        scale in 0.5f64..100.0
    ) {
        let expr = CompiledExpression::compile("({x}-{y})*{k}");
        let values = HashMap::from([
            ("{x}", Some(a)),
            ("{y}", Some(b)),
            ("{k}", Some(scale)),
        ]);
        prop_assert_eq!(expr.evaluate(&values), (a - b) * scale);
    }

    #[test]
    fn null_operand_collapses_the_sample_to_zero_property(factor in -1.0e6f64..1.0e6) {
        let expr = CompiledExpression::compile("{x}*3+{y}");
        let values = HashMap::from([("{x}", Some(factor)), ("{y}", None)]);
        prop_assert_eq!(expr.evaluate(&values), 0.0);
    }

    #[test]
    fn placeholder_scan_survives_malformed_bodies_property(
        garbage in "[+*/()-]{0,12}"
    ) {
        let text = format!("{{a}}{garbage}{{b}}");
        let expr = CompiledExpression::compile(&text);
        let keys: Vec<String> = expr.placeholders().iter().cloned().collect();
        prop_assert_eq!(keys, vec!["{a}".to_owned(), "{b}".to_owned()]);
    }
}
