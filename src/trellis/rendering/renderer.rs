//! Delegate table and renderer

use super::context::RenderContext;
use super::error::RenderError;
use crate::trellis::ast::SyntaxNode;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub type Callback<O> =
    Rc<dyn Fn(&Renderer<O>, &SyntaxNode, &mut RenderContext<O>) -> Result<(), RenderError>>;

/// Wrap a closure as a [Callback]
pub fn callback<O, F>(f: F) -> Callback<O>
where
    F: Fn(&Renderer<O>, &SyntaxNode, &mut RenderContext<O>) -> Result<(), RenderError> + 'static,
{
    Rc::new(f)
}

/// Callbacks keyed by `before:<type>`, `<type>` and `after:<type>`, plus a fallback
pub struct Delegate<O> {
    hooks: HashMap<String, Callback<O>>,
    fallback: Option<Callback<O>>,
}

impl<O> Default for Delegate<O> {
    fn default() -> Self {
        Self {
            hooks: HashMap::new(),
            fallback: None,
        }
    }
}

impl<O> Delegate<O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before(self, kind: &str, cb: Callback<O>) -> Self {
        self.hook(format!("before:{}", kind), cb)
    }

    pub fn on(self, kind: &str, cb: Callback<O>) -> Self {
        self.hook(kind.to_string(), cb)
    }

    pub fn after(self, kind: &str, cb: Callback<O>) -> Self {
        self.hook(format!("after:{}", kind), cb)
    }

    /// Main hook for types with no entry of their own
    pub fn fallback(mut self, cb: Callback<O>) -> Self {
        self.fallback = Some(cb);
        self
    }

    /// Register a callback under a raw key
    pub fn hook(mut self, key: impl Into<String>, cb: Callback<O>) -> Self {
        self.hooks.insert(key.into(), cb);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Callback<O>> {
        self.hooks.get(key)
    }

    pub fn fallback_hook(&self) -> Option<&Callback<O>> {
        self.fallback.as_ref()
    }
}

impl<O> fmt::Debug for Delegate<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.hooks.keys().collect();
        keys.sort();
        f.debug_struct("Delegate")
            .field("hooks", &keys)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

#[derive(Debug)]
pub struct Renderer<O> {
    delegate: Delegate<O>,
}

impl<O> Renderer<O> {
    pub fn new(delegate: Delegate<O>) -> Self {
        Self { delegate }
    }

    pub fn delegate(&self) -> &Delegate<O> {
        &self.delegate
    }

    /// Render `root` starting from `ctx`, returning the final context
    pub fn render(
        &self,
        root: &SyntaxNode,
        mut ctx: RenderContext<O>,
    ) -> Result<RenderContext<O>, RenderError> {
        self.render_node(root, &mut ctx)?;
        Ok(ctx)
    }

    /// Run the before, main and after hooks of `node`
    pub fn render_node(
        &self,
        node: &SyntaxNode,
        ctx: &mut RenderContext<O>,
    ) -> Result<(), RenderError> {
        let before = format!("before:{}", node.kind);
        if let Some(cb) = self.delegate.get(&before) {
            tracing::trace!("{}{} → {}", " ".repeat(ctx.depth), node.kind, before);
            cb(self, node, ctx)?;
        }

        match self
            .delegate
            .get(&node.kind)
            .or(self.delegate.fallback_hook())
        {
            Some(cb) => {
                tracing::trace!("{}{} → hook", " ".repeat(ctx.depth), node.kind);
                cb(self, node, ctx)?;
            }
            None => {
                tracing::trace!("{}{} → children", " ".repeat(ctx.depth), node.kind);
                self.render_children(node, ctx)?;
            }
        }

        let after = format!("after:{}", node.kind);
        if let Some(cb) = self.delegate.get(&after) {
            tracing::trace!("{}{} → {}", " ".repeat(ctx.depth), node.kind, after);
            cb(self, node, ctx)?;
        }
        Ok(())
    }

    /// Render each child one level deeper
    pub fn render_children(
        &self,
        node: &SyntaxNode,
        ctx: &mut RenderContext<O>,
    ) -> Result<(), RenderError> {
        ctx.depth += 1;
        ctx.ancestors.push(node.kind.clone());
        let result = node
            .children
            .iter()
            .try_for_each(|child| self.render_node(child, ctx));
        ctx.ancestors.pop();
        ctx.depth -= 1;
        result
    }
}

impl Renderer<String> {
    /// Render into a fresh string
    pub fn render_to_string(&self, root: &SyntaxNode) -> Result<String, RenderError> {
        Ok(self
            .render(root, RenderContext::new(String::new()))?
            .into_output())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trellis::token::Token;

    fn sample() -> SyntaxNode {
        let mut root = SyntaxNode::rule(0, "pair");
        root.children
            .push(SyntaxNode::leaf(1, &Token::new("A", "a", 0..1)));
        root.children
            .push(SyntaxNode::leaf(2, &Token::new("B", "b", 1..2)));
        root
    }

    fn trace(label: &'static str) -> Callback<Vec<String>> {
        callback(move |_, node, ctx: &mut RenderContext<Vec<String>>| {
            ctx.output.push(format!("{}:{}", label, node.kind));
            Ok(())
        })
    }

    #[test]
    fn test_hook_order() {
        let renderer = Renderer::new(
            Delegate::new()
                .before("pair", trace("before"))
                .after("pair", trace("after"))
                .on("A", trace("on"))
                .fallback(trace("fallback")),
        );
        let out = renderer
            .render(&sample(), RenderContext::new(Vec::new()))
            .unwrap()
            .into_output();
        // `pair` has no main hook but the fallback catches it, so its children are not visited
        assert_eq!(out, vec!["before:pair", "fallback:pair", "after:pair"]);
    }

    #[test]
    fn test_missing_hooks_render_children() {
        let renderer = Renderer::new(Delegate::new().on("A", trace("on")).on("B", trace("on")));
        let out = renderer
            .render(&sample(), RenderContext::new(Vec::new()))
            .unwrap()
            .into_output();
        assert_eq!(out, vec!["on:A", "on:B"]);
    }

    #[test]
    fn test_depth_and_ancestors() {
        let renderer = Renderer::new(Delegate::new().fallback(callback(
            |r: &Renderer<Vec<String>>, node: &SyntaxNode, ctx: &mut RenderContext<Vec<String>>| {
                let line = format!("{}{}<{}", ctx.depth, node.kind, ctx.parent_kind().unwrap_or("-"));
                ctx.output.push(line);
                r.render_children(node, ctx)
            },
        )));
        let ctx = renderer
            .render(&sample(), RenderContext::new(Vec::new()))
            .unwrap();
        assert_eq!(ctx.output, vec!["0pair<-", "1A<pair", "1B<pair"]);
        assert_eq!(ctx.depth, 0);
        assert!(ctx.ancestors().is_empty());
    }

    #[test]
    fn test_errors_stop_the_walk() {
        let renderer: Renderer<String> = Renderer::new(
            Delegate::new().on("A", callback(|_, node, _| Err(RenderError::callback(node.kind.clone(), "boom")))),
        );
        let err = renderer.render_to_string(&sample()).unwrap_err();
        assert_eq!(err, RenderError::callback("A", "boom"));
    }
}
