use proptest::prelude::*;
use umbra_blocks::config::{BlockDef, BlocksConfig};
use umbra_blocks::{Block, BlockRegistry, RenderKind};

fn arb_render() -> impl Strategy<Value = Option<RenderKind>> {
    prop_oneof![
        Just(None),
        Just(Some(RenderKind::Model)),
        Just(Some(RenderKind::Invisible)),
    ]
}

fn arb_def(i: usize) -> impl Strategy<Value = BlockDef> {
    (arb_render(), any::<Option<bool>>(), any::<Option<bool>>()).prop_map(
        move |(render, fluid, opaque)| BlockDef {
            name: format!("block_{i}"),
            id: None,
            render,
            fluid,
            opaque,
            opaque_states: None,
        },
    )
}

fn arb_config() -> impl Strategy<Value = BlocksConfig> {
    (1usize..24)
        .prop_flat_map(|n| (0..n).map(arb_def).collect::<Vec<_>>())
        .prop_map(|blocks| BlocksConfig {
            blocks,
            unknown_block: None,
        })
}

proptest! {
    // Ids are assigned in declaration order and names round-trip
    #[test]
    fn ids_follow_declaration_order(cfg in arb_config()) {
        let names: Vec<String> = cfg.blocks.iter().map(|d| d.name.clone()).collect();
        let reg = BlockRegistry::from_configs(cfg).unwrap();
        prop_assert_eq!(reg.len(), names.len());
        for (i, name) in names.iter().enumerate() {
            prop_assert_eq!(reg.id_by_name(name), Some(i as u16));
            prop_assert_eq!(&reg.get(i as u16).unwrap().name, name);
        }
    }

    // Content and opacity defaults follow the render kind
    #[test]
    fn content_and_opacity_follow_definition(cfg in arb_config()) {
        let defs = cfg.blocks.clone();
        let reg = BlockRegistry::from_configs(cfg).unwrap();
        for (i, def) in defs.iter().enumerate() {
            let b = Block::new(i as u16);
            let render = def.render.unwrap_or_default();
            let expect_content = render == RenderKind::Model || def.fluid.unwrap_or(false);
            let expect_opaque = def.opaque.unwrap_or(render == RenderKind::Model);
            prop_assert_eq!(reg.has_content(b), expect_content);
            prop_assert_eq!(reg.is_opaque(b), expect_opaque);
        }
    }

    // Ids past the table fall back to block 0
    #[test]
    fn out_of_range_ids_fall_back_to_first(cfg in arb_config(), extra in 100u16..1000) {
        let reg = BlockRegistry::from_configs(cfg).unwrap();
        prop_assert_eq!(reg.has_content(Block::new(extra)), reg.has_content(Block::new(0)));
        prop_assert_eq!(reg.is_opaque(Block::new(extra)), reg.is_opaque(Block::new(0)));
    }
}
