//! Random operation sequences never leave one-sided or dangling edges.

use mint_lib::{IdSource, Result, Store};
use proptest::prelude::*;

const ISSUES: usize = 6;

struct Sequential(usize);

impl IdSource for Sequential {
    fn next_id(&mut self, prefix: &str, _issue_count: usize) -> Result<String> {
        let id = format!("{prefix}-{}", self.0);
        self.0 += 1;
        Ok(id)
    }
}

#[derive(Debug, Clone)]
enum Op {
    DependsOn(usize, usize),
    Blocks(usize, usize),
    UnlinkDependsOn(usize, usize),
    UnlinkBlocks(usize, usize),
    Close(usize),
    Delete(usize),
    Rename(bool),
}

fn op() -> impl Strategy<Value = Op> {
    let pair = || (0..ISSUES, 0..ISSUES);
    prop_oneof![
        3 => pair().prop_map(|(a, b)| Op::DependsOn(a, b)),
        3 => pair().prop_map(|(a, b)| Op::Blocks(a, b)),
        2 => pair().prop_map(|(a, b)| Op::UnlinkDependsOn(a, b)),
        2 => pair().prop_map(|(a, b)| Op::UnlinkBlocks(a, b)),
        1 => (0..ISSUES).prop_map(Op::Close),
        1 => (0..ISSUES).prop_map(Op::Delete),
        1 => any::<bool>().prop_map(Op::Rename),
    ]
}

fn apply(store: &mut Store, op: &Op) -> Result<()> {
    let prefix = store.prefix().to_string();
    let id = |n: usize| format!("{prefix}-{n}");

    match *op {
        Op::DependsOn(a, b) => store.link_depends_on(&id(a), &id(b)),
        Op::Blocks(a, b) => store.link_blocks(&id(a), &id(b)),
        Op::UnlinkDependsOn(a, b) => store.unlink_depends_on(&id(a), &id(b)),
        Op::UnlinkBlocks(a, b) => store.unlink_blocks(&id(a), &id(b)),
        Op::Close(a) => store.close_issue(&id(a), "").map(drop),
        Op::Delete(a) => store.delete_issue(&id(a)).map(drop),
        Op::Rename(flip) => {
            let prefix = if flip { "left" } else { "right" };
            store.set_prefix(prefix).map(drop)
        }
    }
}

proptest! {
    #[test]
    fn edges_stay_mirrored(ops in prop::collection::vec(op(), 0..60)) {
        let mut store = Store::new("t");
        let mut ids = Sequential(0);
        for n in 0..ISSUES {
            store.create_issue_with(&format!("Issue {n}"), &mut ids).unwrap();
        }

        for op in &ops {
            let before = store.clone();
            if apply(&mut store, op).is_err() {
                prop_assert_eq!(&store, &before, "failed {:?} mutated the store", op);
            }
            prop_assert!(store.inconsistencies().is_empty(), "after {:?}", op);
        }
    }
}
