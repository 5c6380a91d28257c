//! Sales and purchases screens.

use clap::{ArgGroup, Args, Subcommand};

use super::catalog::{show, submit};
use super::{delete_record, load_list, render_list, set, CliError, Context, Labelled, ListArgs};
use crate::model::{Customer, Id, PaymentMethod, Product, Purchase, PurchaseItem, Sale, SaleItem, SaleStatus};
use crate::services::ReferenceData;
use crate::state::form::PurchaseItemDraft;
use crate::state::{CartError, Column, CustomerChoice, Form, RowAction, SaleDraft, TableError};
use crate::util::numbers::parse_integer;
use crate::util::render::{key_values, money, text_table};

const SALE_ACTIONS: [RowAction; 2] = [RowAction::View, RowAction::Delete];
const PURCHASE_ACTIONS: [RowAction; 3] = [RowAction::View, RowAction::Edit, RowAction::Delete];

impl Labelled for Sale {
    fn label(&self) -> String {
        format!("{} por {}", self.date().map_or("sin fecha", |d| d.get(..10).unwrap_or(d)), money(self.total))
    }
}

impl Labelled for PurchaseItem {
    fn label(&self) -> String {
        format!("{} x{}", product_label(self.product_name.as_deref(), self.product_id), self.quantity)
    }
}

fn product_label(name: Option<&str>, id: Id) -> String {
    name.map_or_else(|| format!("Producto ID: {id}"), str::to_owned)
}

fn day_of(raw: Option<&str>) -> String {
    raw.map(|d| d.get(..10).unwrap_or(d).to_owned()).unwrap_or_default()
}

// =============================================================================
// SALES
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum SalesCommand {
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Only sales in this status (pending, completed, cancelled, refunded).
        #[arg(long)]
        status: Option<String>,
    },
    /// Sale header and its line items.
    Show {
        id: Id,
    },
    Create(SaleCreateArgs),
    /// Move a sale to another status.
    Status {
        id: Id,
        status: String,
    },
    Cancel {
        id: Id,
        #[arg(long, short = 'y')]
        yes: bool,
    },
    Delete {
        id: Id,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("customer").required(true).args(["customer_id", "customer_name"])))]
pub struct SaleCreateArgs {
    /// Registered customer.
    #[arg(long)]
    pub customer_id: Option<Id>,
    /// Walk-in customer name.
    #[arg(long)]
    pub customer_name: Option<String>,
    /// Line as PRODUCT_ID:QUANTITY; repeat for more lines.
    #[arg(long = "item", required = true)]
    pub items: Vec<String>,
    /// cash, card, or transfer.
    #[arg(long, default_value = "cash")]
    pub payment: String,
    /// Replace this existing sale instead of creating a new one.
    #[arg(long)]
    pub replace: Option<Id>,
}

/// Split a `PRODUCT_ID:QUANTITY` item argument.
///
/// # Errors
///
/// `InvalidArgument` when the separator or the product id is missing.
pub fn parse_item(raw: &str) -> Result<(Id, &str), CliError> {
    let invalid = || CliError::InvalidArgument(format!("ítem '{raw}': use PRODUCTO:CANTIDAD"));
    let (product, quantity) = raw.split_once(':').ok_or_else(invalid)?;
    let product = parse_integer(product).ok_or_else(invalid)?;
    Ok((product, quantity))
}

fn parse_status(raw: &str) -> Result<SaleStatus, CliError> {
    SaleStatus::parse(raw).ok_or_else(|| {
        let options: Vec<_> = SaleStatus::ALL.iter().map(|s| s.as_str()).collect();
        CliError::InvalidArgument(format!("estado '{raw}' desconocido; use uno de: {}", options.join(", ")))
    })
}

fn sale_columns(refs: &ReferenceData) -> Vec<Column<'_, Sale>> {
    vec![
        Column::new("id", "ID"),
        Column::new("sale_date", "Fecha").sortable().render(|s: &Sale| day_of(s.date())),
        Column::new("customer", "Cliente").render(|s: &Sale| refs.customer_name(s)),
        Column::new("total", "Total").sortable().render(|s: &Sale| money(s.total)),
        Column::new("payment_method", "Pago").render(|s: &Sale| s.payment_method.label().to_owned()),
        Column::new("status", "Estado").render(|s: &Sale| s.status.label().to_owned()),
    ]
}

fn items_table(items: &[SaleItem], products: &[Product]) -> String {
    let headers: Vec<String> = ["Producto", "Cantidad", "Precio", "Subtotal"].map(str::to_owned).to_vec();
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|i| {
            let name = i
                .product_name
                .clone()
                .or_else(|| products.iter().find(|p| p.id == i.product_id).map(|p| p.name.clone()));
            vec![product_label(name.as_deref(), i.product_id), i.quantity.to_string(), money(i.unit_price), money(i.line_total())]
        })
        .collect();
    text_table(&headers, &rows)
}

/// # Errors
///
/// Returns the load, validation, cart, or API error of the subcommand.
pub async fn run_sales(ctx: &mut Context, cmd: SalesCommand) -> Result<String, CliError> {
    match cmd {
        SalesCommand::List { list, status } => {
            let status = status.as_deref().map(parse_status).transpose()?;
            let (sales, refs) = tokio::join!(load_list::<Sale>(&ctx.api), ReferenceData::for_sales(&ctx.api));
            let mut items = sales?.items;
            if let Some(status) = status {
                items.retain(|s| s.status == status);
            }
            render_list(ctx, &items, &list, &SALE_ACTIONS, &sale_columns(&refs))
        }
        SalesCommand::Show { id } => show_sale(ctx, id).await,
        SalesCommand::Create(args) => create_sale(ctx, args).await,
        SalesCommand::Status { id, status } => {
            let status = parse_status(&status)?;
            ctx.api.update_sale_status(id, status).await?;
            Ok(format!("Venta {id} marcada como {}.\n", status.label()))
        }
        SalesCommand::Cancel { id, yes } => {
            ctx.confirm(&format!("¿Cancelar la venta {id}?"), yes)?;
            ctx.api.cancel_sale(id).await?;
            Ok(format!("Venta {id} cancelada.\n"))
        }
        SalesCommand::Delete { id, yes } => delete_record::<Sale>(ctx, id, yes).await,
    }
}

async fn show_sale(ctx: &Context, id: Id) -> Result<String, CliError> {
    let (sale, refs, products) =
        tokio::join!(ctx.api.get::<Sale>(id), ReferenceData::for_sales(&ctx.api), ctx.api.list::<Product>());
    let mut sale = sale?;
    if sale.items.is_empty() {
        sale.items = ctx.api.sale_items(id).await?;
    }
    if ctx.json {
        return super::to_json(&sale);
    }
    let products = products.unwrap_or_default();
    let mut out = key_values(&[
        ("Venta", sale.id.to_string()),
        ("Fecha", day_of(sale.date())),
        ("Cliente", refs.customer_name(&sale)),
        ("Pago", sale.payment_method.label().to_owned()),
        ("Estado", sale.status.label().to_owned()),
        ("Total", money(sale.total)),
    ]);
    out.push('\n');
    out.push_str(&items_table(&sale.items, &products));
    Ok(out)
}

async fn create_sale(ctx: &Context, args: SaleCreateArgs) -> Result<String, CliError> {
    let products = load_list::<Product>(&ctx.api).await?;
    let mut cart = SaleDraft::default();
    cart.payment = PaymentMethod::parse(&args.payment)
        .ok_or_else(|| CliError::InvalidArgument(format!("método de pago '{}' desconocido", args.payment)))?;
    cart.customer = Some(match (args.customer_id, args.customer_name) {
        (Some(id), _) => CustomerChoice::existing(&ctx.api.get::<Customer>(id).await?),
        (None, name) => CustomerChoice::WalkIn(name.unwrap_or_default()),
    });
    for raw in &args.items {
        let (product_id, quantity) = parse_item(raw)?;
        let product = products.find(product_id).ok_or(TableError::RowNotFound(product_id))?;
        let quantity = parse_integer(quantity).ok_or(CartError::InvalidQuantity)?;
        cart.add(product, quantity)?;
    }
    let payload = cart.to_payload()?;
    let saved = match args.replace {
        Some(id) => ctx.api.update::<Sale>(id, &payload).await?,
        None => ctx.api.create::<Sale>(&payload).await?,
    };
    if ctx.json {
        return super::to_json(&saved);
    }
    let mut out = format!("Venta registrada para {} por {}.\n", payload.customer, money(payload.total));
    if let Some(sale) = saved {
        out.push_str(&format!("ID de venta: {}\n", sale.id));
    }
    Ok(out)
}

// =============================================================================
// PURCHASES
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum PurchasesCommand {
    List {
        #[command(flatten)]
        list: ListArgs,
        /// List purchase orders instead of their line items.
        #[arg(long)]
        orders: bool,
    },
    Show {
        id: Id,
    },
    Create(PurchaseItemArgs),
    Update {
        id: Id,
        #[command(flatten)]
        fields: PurchaseItemArgs,
    },
    Delete {
        id: Id,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Purchase line inputs. Without `--cost` the product's cost is used.
#[derive(Args, Debug, Clone, Default)]
pub struct PurchaseItemArgs {
    #[arg(long)]
    pub purchase_id: Option<String>,
    #[arg(long)]
    pub product_id: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub quantity: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub cost: Option<String>,
}

impl PurchaseItemArgs {
    /// Select the product first so an explicit cost wins over the prefill.
    async fn apply(self, ctx: &Context, draft: &mut PurchaseItemDraft) -> Result<(), CliError> {
        if let Some(product_id) = self.product_id.as_deref().and_then(parse_integer) {
            let product = ctx.api.get::<Product>(product_id).await?;
            draft.select_product(&product);
        } else {
            set(&mut draft.product_id, self.product_id);
        }
        set(&mut draft.purchase_id, self.purchase_id);
        set(&mut draft.quantity, self.quantity);
        set(&mut draft.cost, self.cost);
        Ok(())
    }
}

/// # Errors
///
/// Returns the load, validation, or API error of the subcommand.
pub async fn run_purchases(ctx: &mut Context, cmd: PurchasesCommand) -> Result<String, CliError> {
    match cmd {
        PurchasesCommand::List { list, orders: true } => {
            let (orders, refs) = tokio::join!(ctx.api.purchases(), ReferenceData::for_products(&ctx.api));
            let orders = orders?;
            let columns = [
                Column::new("id", "ID"),
                Column::new("supplier_id", "Proveedor").render(|p: &Purchase| refs.supplier_name(p.supplier_id)),
                Column::new("purchase_date", "Fecha").render(|p: &Purchase| day_of(p.purchase_date.as_deref())),
                Column::new("total", "Total").render(|p: &Purchase| money(p.total)),
                Column::new("status", "Estado").render(|p: &Purchase| p.status.label().to_owned()),
            ];
            render_list(ctx, &orders, &list, &[], &columns)
        }
        PurchasesCommand::List { list, orders: false } => {
            let items = load_list::<PurchaseItem>(&ctx.api).await?.items;
            let columns = [
                Column::new("id", "ID"),
                Column::new("purchase_id", "Compra"),
                Column::new("product_name", "Producto")
                    .render(|i: &PurchaseItem| product_label(i.product_name.as_deref(), i.product_id)),
                Column::new("quantity", "Cantidad"),
                Column::new("cost", "Costo").render(|i: &PurchaseItem| money(i.cost)),
                Column::new("subtotal", "Subtotal").render(|i: &PurchaseItem| money(i.line_total())),
            ];
            render_list(ctx, &items, &list, &PURCHASE_ACTIONS, &columns)
        }
        PurchasesCommand::Show { id } => show::<PurchaseItem>(ctx, id).await,
        PurchasesCommand::Create(fields) => {
            let mut form = Form::<PurchaseItemDraft>::open_create();
            fields.apply(ctx, &mut form.draft).await?;
            submit(ctx, &form).await
        }
        PurchasesCommand::Update { id, fields } => {
            let mut form = Form::<PurchaseItemDraft>::open_edit(&ctx.api.get::<PurchaseItem>(id).await?);
            fields.apply(ctx, &mut form.draft).await?;
            submit(ctx, &form).await
        }
        PurchasesCommand::Delete { id, yes } => delete_record::<PurchaseItem>(ctx, id, yes).await,
    }
}

#[cfg(test)]
#[path = "sales_test.rs"]
mod tests;
