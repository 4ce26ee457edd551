//! Load -> declare -> rename -> merge.

use metricset_core::{Collection, Declare, Diagnostics};

use crate::config::ToolConfig;

/// Parse `input` and apply every configured operation in order.
pub fn run(cfg: &ToolConfig, input: &str, diag: Diagnostics) -> Collection {
    let mut coll = Collection::from_text(input, diag, cfg.load.dismiss_comments);

    for d in &cfg.declare {
        let mut decl = Declare::new();
        if let Some(h) = &d.help {
            decl = decl.help(h.as_str());
        }
        if let Some(k) = &d.kind {
            decl = decl.kind(k.as_str());
        }
        coll.declare(&d.name, decl);
    }

    for r in &cfg.rename {
        let changed = coll.rename_metrics(&r.from, &r.to, r.force);
        tracing::debug!(from = %r.from, to = %r.to, force = r.force, changed, "rename applied");
    }

    for m in &cfg.merge {
        let changed = coll.merge_metrics(&m.into, &m.from);
        tracing::debug!(into = %m.into, from = %m.from, changed, "merge applied");
    }

    coll
}
