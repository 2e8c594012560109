//! Stock callbacks
//!
//! Most of these append to a `String` output. The `indent` flag prefixes the appended line with
//! one space per level of depth.

use super::context::RenderContext;
use super::error::RenderError;
use super::renderer::{callback, Callback, Renderer};
use std::rc::Rc;

/// Do nothing, not even render the children
pub fn ignore<O: 'static>() -> Callback<O> {
    callback(|_, _, _| Ok(()))
}

pub fn render_children<O: 'static>() -> Callback<O> {
    callback(|renderer: &Renderer<O>, node, ctx| renderer.render_children(node, ctx))
}

/// Append the node's content
pub fn append_content() -> Callback<String> {
    callback(|_, node, ctx: &mut RenderContext<String>| {
        if let Some(content) = &node.content {
            ctx.output.push_str(content);
        }
        Ok(())
    })
}

/// Append the value of the context variable named by the node's content
pub fn append_variable() -> Callback<String> {
    callback(|_, node, ctx: &mut RenderContext<String>| {
        let name = node.content.as_deref().unwrap_or_default();
        let value = ctx
            .variables
            .get(name)
            .cloned()
            .ok_or_else(|| RenderError::MissingVariable {
                name: name.to_string(),
            })?;
        ctx.output.push_str(&value);
        Ok(())
    })
}

pub fn append_constant(value: impl Into<String>, indent: bool) -> Callback<String> {
    let value = value.into();
    callback(move |_, _, ctx: &mut RenderContext<String>| {
        let line = format!("{}{}\n", ctx.indentation(indent), value);
        ctx.output.push_str(&line);
        Ok(())
    })
}

/// Append the node's type on its own line
pub fn append_name(indent: bool) -> Callback<String> {
    labelled("", indent)
}

pub fn append_name_start(indent: bool) -> Callback<String> {
    labelled("START ", indent)
}

pub fn append_name_end(indent: bool) -> Callback<String> {
    labelled("END ", indent)
}

fn labelled(prefix: &'static str, indent: bool) -> Callback<String> {
    callback(move |_, node, ctx: &mut RenderContext<String>| {
        let line = format!("{}{}{}\n", ctx.indentation(indent), prefix, node.kind);
        ctx.output.push_str(&line);
        Ok(())
    })
}

/// Append `[[type]]`, then render the children
pub fn append_placeholder(indent: bool) -> Callback<String> {
    callback(
        move |renderer: &Renderer<String>, node, ctx: &mut RenderContext<String>| {
            let line = format!("{}[[{}]]\n", ctx.indentation(indent), node.kind);
            ctx.output.push_str(&line);
            renderer.render_children(node, ctx)
        },
    )
}

/// Render the node with another renderer, sharing this walk's context
pub fn delegate_to<O: 'static>(other: Rc<Renderer<O>>) -> Callback<O> {
    callback(move |_, node, ctx| other.render_node(node, ctx))
}

/// Render the node's children with another renderer, sharing this walk's context
pub fn delegate_children_to<O: 'static>(other: Rc<Renderer<O>>) -> Callback<O> {
    callback(move |_, node, ctx| other.render_children(node, ctx))
}
