//! Preview and submit orders.

use anyhow::{anyhow, bail, Context as _, Result};
use dialoguer::Confirm;
use serde_json::json;
use tvbox_commerce::cart::Cart;
use tvbox_commerce::catalog::Product;
use tvbox_commerce::checkout::{normalize_phone, DeliveryService, MessageKind, OrderForm, OrderSummary};

use super::{OrderArgs, OrderCommand, OrderDetails};
use crate::context::Context;

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    match args.command {
        OrderCommand::Preview(details) => preview(details, ctx).await,
        OrderCommand::Submit { details, yes } => submit(details, yes, ctx).await,
    }
}

async fn preview(details: OrderDetails, ctx: &Context) -> Result<()> {
    let (cart, message) = prepare(&details, ctx).await?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": cart.total_units(),
            "total": cart.total_price().amount,
            "message": message,
        }));
        return Ok(());
    }

    ctx.output.header("Предпросмотр заказа");
    ctx.output.raw(&message);
    Ok(())
}

async fn submit(details: OrderDetails, yes: bool, ctx: &Context) -> Result<()> {
    let relay = ctx.telegram_relay()?;

    ctx.output.step(1, 3, "Собираем корзину");
    let (cart, message) = prepare(&details, ctx).await?;
    ctx.output.kv("Товаров", &cart.total_units().to_string());
    ctx.output.kv("Итого", &cart.total_price().display());

    ctx.output.step(2, 3, "Проверяем заказ");
    if !ctx.output.is_json() {
        ctx.output.raw(&message);
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Отправить заказ менеджерам?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Заказ не отправлен");
            return Ok(());
        }
    }

    ctx.output.step(3, 3, "Отправляем заказ");
    let spinner = ctx.output.spinner("Sending...");
    let result = relay.send(&message, MessageKind::Order).await;
    spinner.finish_and_clear();
    let report = result.context("Failed to send order")?;

    for failure in &report.failed {
        ctx.output
            .warn(&format!("Chat {}: {}", failure.chat_id, failure.reason));
    }

    if ctx.output.is_json() {
        ctx.output.json(&report);
    }

    if !report.is_delivered() {
        bail!("Order was not delivered to any chat");
    }

    ctx.output.success(&format!(
        "Заказ отправлен ({} из {} чатов)",
        report.delivered.len(),
        report.delivered.len() + report.failed.len()
    ));
    Ok(())
}

/// Fill a cart from the requested items and render the order message.
async fn prepare(details: &OrderDetails, ctx: &Context) -> Result<(Cart, String)> {
    let form = order_form(details)?;
    let products = ctx.load_products(details.file.as_deref()).await?;
    let cart = fill_cart(&details.items, &products)?;
    ctx.output.debug(&format!(
        "Cart has {} line(s), {} unit(s)",
        cart.item_count(),
        cart.total_units()
    ));

    let message = OrderSummary::render(&form, &cart)?;
    Ok((cart, message))
}

/// Order form from command line details. The phone is normalized first.
pub fn order_form(details: &OrderDetails) -> Result<OrderForm> {
    let phone = normalize_phone(details.phone.trim())
        .ok_or_else(|| anyhow!("Phone number is too long: {}", details.phone))?;

    let form = OrderForm {
        full_name: details.name.clone(),
        phone,
        address: details.address.clone(),
        comment: details.comment.clone(),
        delivery: parse_delivery(&details.delivery)?,
    };
    form.validate()?;
    Ok(form)
}

/// Delivery service named on the command line.
pub fn parse_delivery(value: &str) -> Result<DeliveryService> {
    match value.trim().to_lowercase().as_str() {
        "sdek" | "cdek" | "сдэк" => Ok(DeliveryService::Sdek),
        "post" | "russianpost" | "почта" => Ok(DeliveryService::RussianPost),
        other => bail!("Unknown delivery service '{}' (expected sdek or post)", other),
    }
}

/// Add each requested product once per mention, in order.
pub fn fill_cart(ids: &[String], products: &[Product]) -> Result<Cart> {
    let mut cart = Cart::new();
    for id in ids {
        let id = id.trim();
        let product = products
            .iter()
            .find(|p| p.id.as_str() == id)
            .ok_or_else(|| anyhow!("Product not found: {}", id))?;
        cart.add_item(product)?;
    }
    Ok(cart)
}
