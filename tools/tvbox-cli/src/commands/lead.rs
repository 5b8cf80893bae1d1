//! Send a callback request or a product-picker quiz.

use anyhow::{anyhow, bail, Context as _, Result};
use tvbox_commerce::checkout::{normalize_phone, LeadRequest, MessageKind, QuizLead};

use super::LeadArgs;
use crate::context::Context;

/// Run the lead command.
pub async fn run(args: LeadArgs, ctx: &Context) -> Result<()> {
    let message = match quiz_lead(&args)? {
        Some(quiz) => quiz.render()?,
        None => lead_request(&args)?.render()?,
    };

    if args.dry_run {
        if ctx.output.is_json() {
            ctx.output.json(&serde_json::json!({ "message": message }));
        } else {
            ctx.output.raw(&message);
        }
        return Ok(());
    }

    let relay = ctx.telegram_relay()?;
    let report = relay
        .send(&message, MessageKind::Question)
        .await
        .context("Failed to send request")?;

    for failure in &report.failed {
        ctx.output
            .warn(&format!("Chat {}: {}", failure.chat_id, failure.reason));
    }
    if ctx.output.is_json() {
        ctx.output.json(&report);
    }
    if !report.is_delivered() {
        bail!("Request was not delivered to any chat");
    }

    ctx.output.success("Заявка отправлена");
    Ok(())
}

fn phone(args: &LeadArgs) -> Result<String> {
    normalize_phone(args.phone.trim())
        .ok_or_else(|| anyhow!("Phone number is too long: {}", args.phone))
}

fn lead_request(args: &LeadArgs) -> Result<LeadRequest> {
    let lead = LeadRequest::new(args.form.trim(), phone(args)?);
    Ok(match args.topic.as_deref().map(str::trim) {
        Some(topic) if !topic.is_empty() => lead.with_topic(topic),
        _ => lead,
    })
}

/// The quiz request, when any quiz answer was given.
fn quiz_lead(args: &LeadArgs) -> Result<Option<QuizLead>> {
    if args.tv_type.is_none() && args.goal.is_none() && args.budget.is_none() {
        return Ok(None);
    }
    Ok(Some(QuizLead {
        tv_type: args.tv_type.clone(),
        usage: args.goal.clone(),
        budget: args.budget.clone(),
        phone: phone(args)?,
    }))
}
