//! Products, stock, categories, suppliers, and customers screens.

use clap::{ArgGroup, Args, Subcommand};

use super::{delete_record, detail, load_list, render_list, set, CliError, Context, Labelled, ListArgs};
use crate::model::{Category, Customer, Id, Product, Record, Resource, Supplier};
use crate::services::ReferenceData;
use crate::state::form::{CategoryDraft, CustomerDraft, Draft, ProductDraft, SupplierDraft};
use crate::state::stock::Direction;
use crate::state::{Column, Form, FormMode, ListState, ListView, RowAction, StockAdjustment};
use crate::util::render::{key_values, money};

const CRUD_ACTIONS: [RowAction; 3] = [RowAction::View, RowAction::Edit, RowAction::Delete];
const PRODUCT_ACTIONS: [RowAction; 4] = [RowAction::View, RowAction::Edit, RowAction::Delete, RowAction::Adjust];

impl Labelled for Product {
    fn label(&self) -> String {
        self.name.clone()
    }
}

impl Labelled for Category {
    fn label(&self) -> String {
        self.name.clone()
    }
}

impl Labelled for Supplier {
    fn label(&self) -> String {
        self.name.clone()
    }
}

impl Labelled for Customer {
    fn label(&self) -> String {
        self.full_name()
    }
}

/// Validate a form and send it, refreshing the collection afterwards.
pub(super) async fn submit<D>(ctx: &Context, form: &Form<D>) -> Result<String, CliError>
where
    D: Draft,
    D::Record: Resource<Payload = D::Payload>,
{
    let submission = form.submit()?;
    let mut list = ListState::<D::Record>::default();
    let saved = list.save(&ctx.api, &submission).await?;
    let noun = <D::Record as Resource>::NOUN;
    match (ctx.json, saved, form.mode) {
        (true, Some(record), _) => super::to_json(&record),
        (_, _, FormMode::Edit(id)) => Ok(format!("Se actualizó {noun} {id}.\n")),
        (_, Some(record), _) => Ok(format!("Se creó {noun} {}.\n", record.id())),
        (_, None, _) => Ok(format!("Se creó {noun}.\n")),
    }
}

// =============================================================================
// PRODUCTS
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum ProductsCommand {
    /// List products with category names.
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Only products at or below their minimum stock.
        #[arg(long)]
        low_stock: bool,
    },
    Show {
        id: Id,
    },
    Create(ProductArgs),
    Update {
        id: Id,
        #[command(flatten)]
        fields: ProductArgs,
    },
    Delete {
        id: Id,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Product inputs. Omitted fields keep their current value on update.
#[derive(Args, Debug, Clone, Default)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub cost: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub stock: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub min_stock: Option<String>,
    #[arg(long)]
    pub category_id: Option<String>,
    #[arg(long)]
    pub supplier_id: Option<String>,
    #[arg(long)]
    pub sku: Option<String>,
    #[arg(long)]
    pub barcode: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
}

impl ProductArgs {
    fn apply(self, draft: &mut ProductDraft) {
        set(&mut draft.name, self.name);
        set(&mut draft.description, self.description);
        set(&mut draft.price, self.price);
        set(&mut draft.cost, self.cost);
        set(&mut draft.stock, self.stock);
        set(&mut draft.min_stock, self.min_stock);
        set(&mut draft.category_id, self.category_id);
        set(&mut draft.supplier_id, self.supplier_id);
        set(&mut draft.sku, self.sku);
        set(&mut draft.barcode, self.barcode);
        set(&mut draft.image, self.image);
        if let Some(active) = self.active {
            draft.is_active = active;
        }
    }
}

fn product_columns(refs: &ReferenceData) -> Vec<Column<'_, Product>> {
    vec![
        Column::new("id", "ID"),
        Column::new("sku", "SKU"),
        Column::new("name", "Nombre").sortable(),
        Column::new("category_id", "Categoría").render(|p: &Product| refs.category_name(p.category_id)),
        Column::new("price", "Precio").sortable().render(|p: &Product| money(p.price)),
        Column::new("stock", "Stock").sortable(),
        Column::new("min_stock", "Mín."),
        Column::new("is_active", "Estado").render(|p: &Product| if p.is_active { "Activo" } else { "Inactivo" }.to_owned()),
    ]
}

/// # Errors
///
/// Returns the load, validation, or API error of the subcommand.
pub async fn run_products(ctx: &mut Context, cmd: ProductsCommand) -> Result<String, CliError> {
    match cmd {
        ProductsCommand::List { list, low_stock } => {
            let (products, refs) = tokio::join!(load_list::<Product>(&ctx.api), ReferenceData::for_products(&ctx.api));
            let mut items = products?.items;
            if low_stock {
                items.retain(Product::is_low_stock);
            }
            render_list(ctx, &items, &list, &PRODUCT_ACTIONS, &product_columns(&refs))
        }
        ProductsCommand::Show { id } => {
            let (product, refs) = tokio::join!(ctx.api.get::<Product>(id), ReferenceData::for_products(&ctx.api));
            let product = product?;
            if ctx.json {
                return super::to_json(&product);
            }
            let mut out = detail(&product)?;
            out.push_str(&key_values(&[
                ("categoría", refs.category_name(product.category_id)),
                ("proveedor", refs.supplier_name(product.supplier_id)),
                ("valor en stock", money(product.stock_value())),
            ]));
            Ok(out)
        }
        ProductsCommand::Create(fields) => {
            let mut form = Form::<ProductDraft>::open_create();
            fields.apply(&mut form.draft);
            submit(ctx, &form).await
        }
        ProductsCommand::Update { id, fields } => {
            let current = ctx.api.get::<Product>(id).await?;
            let mut form = Form::<ProductDraft>::open_edit(&current);
            fields.apply(&mut form.draft);
            submit(ctx, &form).await
        }
        ProductsCommand::Delete { id, yes } => delete_record::<Product>(ctx, id, yes).await,
    }
}

// =============================================================================
// STOCK
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum StockCommand {
    /// Add or subtract units of one product.
    Adjust(AdjustArgs),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("direction").required(true).args(["add", "subtract"])))]
pub struct AdjustArgs {
    pub id: Id,
    /// Units to add.
    #[arg(long, allow_hyphen_values = true)]
    pub add: Option<String>,
    /// Units to remove; may not exceed the current stock.
    #[arg(long, allow_hyphen_values = true)]
    pub subtract: Option<String>,
    #[arg(long, default_value = "")]
    pub reason: String,
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// # Errors
///
/// Returns the lookup, validation, confirmation, or API error.
pub async fn run_stock(ctx: &mut Context, cmd: StockCommand) -> Result<String, CliError> {
    let StockCommand::Adjust(args) = cmd;
    let (direction, quantity) = match (args.add, args.subtract) {
        (Some(q), _) => (Direction::Add, q),
        (None, Some(q)) => (Direction::Subtract, q),
        (None, None) => return Err(CliError::InvalidArgument("indique --add o --subtract".into())),
    };

    let products = load_list::<Product>(&ctx.api).await?;
    let view = ListView::default().with_actions(&[RowAction::Adjust]);
    let event = view.dispatch(RowAction::Adjust.tag(), args.id, &products.items)?;

    let mut flow = StockAdjustment::default();
    flow.open(event.record)?;
    flow.choose(direction)?;
    let plan = flow.enter_quantity(&quantity, &args.reason)?;
    let question = format!(
        "{} {} unidad(es) a '{}': stock {} -> {}. ¿Confirmar?",
        plan.direction.label(),
        plan.quantity,
        plan.target.name,
        plan.target.stock,
        plan.new_stock
    );
    if let Err(e) = ctx.confirm(&question, args.yes) {
        flow.cancel();
        return Err(e);
    }
    let (id, update) = flow.confirm()?;
    let updated = ctx.api.adjust_stock(id, &update).await?;
    if ctx.json {
        return super::to_json(&updated);
    }
    Ok(format!("Stock de '{}' actualizado: {} -> {}.\n", plan.target.name, plan.target.stock, plan.new_stock))
}

// =============================================================================
// CATEGORIES
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum CategoriesCommand {
    List(ListArgs),
    Show {
        id: Id,
    },
    Create(CategoryArgs),
    Update {
        id: Id,
        #[command(flatten)]
        fields: CategoryArgs,
    },
    Delete {
        id: Id,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct CategoryArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

impl CategoryArgs {
    fn apply(self, draft: &mut CategoryDraft) {
        set(&mut draft.name, self.name);
        set(&mut draft.description, self.description);
    }
}

/// # Errors
///
/// Returns the load, validation, or API error of the subcommand.
pub async fn run_categories(ctx: &mut Context, cmd: CategoriesCommand) -> Result<String, CliError> {
    match cmd {
        CategoriesCommand::List(list) => {
            let items = load_list::<Category>(&ctx.api).await?.items;
            let columns = [Column::new("id", "ID"), Column::new("name", "Nombre").sortable(), Column::new("description", "Descripción")];
            render_list(ctx, &items, &list, &CRUD_ACTIONS, &columns)
        }
        CategoriesCommand::Show { id } => show::<Category>(ctx, id).await,
        CategoriesCommand::Create(fields) => {
            let mut form = Form::<CategoryDraft>::open_create();
            fields.apply(&mut form.draft);
            submit(ctx, &form).await
        }
        CategoriesCommand::Update { id, fields } => {
            let mut form = Form::<CategoryDraft>::open_edit(&ctx.api.get::<Category>(id).await?);
            fields.apply(&mut form.draft);
            submit(ctx, &form).await
        }
        CategoriesCommand::Delete { id, yes } => delete_record::<Category>(ctx, id, yes).await,
    }
}

pub(super) async fn show<R: Resource>(ctx: &Context, id: Id) -> Result<String, CliError> {
    let record = ctx.api.get::<R>(id).await?;
    if ctx.json { super::to_json(&record) } else { detail(&record) }
}

// =============================================================================
// SUPPLIERS
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum SuppliersCommand {
    List(ListArgs),
    Show {
        id: Id,
    },
    Create(SupplierArgs),
    Update {
        id: Id,
        #[command(flatten)]
        fields: SupplierArgs,
    },
    Delete {
        id: Id,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SupplierArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub contact_person: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
}

impl SupplierArgs {
    fn apply(self, draft: &mut SupplierDraft) {
        set(&mut draft.name, self.name);
        set(&mut draft.contact_person, self.contact_person);
        set(&mut draft.phone, self.phone);
        set(&mut draft.email, self.email);
        set(&mut draft.address, self.address);
        set(&mut draft.city, self.city);
        set(&mut draft.state, self.state);
        set(&mut draft.postal_code, self.postal_code);
        if let Some(active) = self.active {
            draft.active = active;
        }
    }
}

/// # Errors
///
/// Returns the load, validation, or API error of the subcommand.
pub async fn run_suppliers(ctx: &mut Context, cmd: SuppliersCommand) -> Result<String, CliError> {
    match cmd {
        SuppliersCommand::List(list) => {
            let items = load_list::<Supplier>(&ctx.api).await?.items;
            let columns = [
                Column::new("id", "ID"),
                Column::new("name", "Nombre").sortable(),
                Column::new("contact_person", "Contacto"),
                Column::new("phone", "Teléfono"),
                Column::new("email", "Correo"),
                Column::new("city", "Ciudad"),
                Column::new("active", "Activo"),
            ];
            render_list(ctx, &items, &list, &CRUD_ACTIONS, &columns)
        }
        SuppliersCommand::Show { id } => show::<Supplier>(ctx, id).await,
        SuppliersCommand::Create(fields) => {
            let mut form = Form::<SupplierDraft>::open_create();
            fields.apply(&mut form.draft);
            submit(ctx, &form).await
        }
        SuppliersCommand::Update { id, fields } => {
            let mut form = Form::<SupplierDraft>::open_edit(&ctx.api.get::<Supplier>(id).await?);
            fields.apply(&mut form.draft);
            submit(ctx, &form).await
        }
        SuppliersCommand::Delete { id, yes } => delete_record::<Supplier>(ctx, id, yes).await,
    }
}

// =============================================================================
// CUSTOMERS
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum CustomersCommand {
    List(ListArgs),
    Show {
        id: Id,
    },
    Create(CustomerArgs),
    Update {
        id: Id,
        #[command(flatten)]
        fields: CustomerArgs,
    },
    Delete {
        id: Id,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct CustomerArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    /// National identity document number.
    #[arg(long)]
    pub cc: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
}

impl CustomerArgs {
    fn apply(self, draft: &mut CustomerDraft) {
        set(&mut draft.first_name, self.first_name);
        set(&mut draft.last_name, self.last_name);
        set(&mut draft.cc, self.cc);
        set(&mut draft.phone, self.phone);
        set(&mut draft.email, self.email);
        set(&mut draft.address, self.address);
        set(&mut draft.city, self.city);
        set(&mut draft.state, self.state);
        set(&mut draft.postal_code, self.postal_code);
        if let Some(active) = self.active {
            draft.active = active;
        }
    }
}

/// # Errors
///
/// Returns the load, validation, or API error of the subcommand.
pub async fn run_customers(ctx: &mut Context, cmd: CustomersCommand) -> Result<String, CliError> {
    match cmd {
        CustomersCommand::List(list) => {
            let items = load_list::<Customer>(&ctx.api).await?.items;
            let columns = [
                Column::new("id", "ID"),
                Column::new("first_name", "Nombre").sortable().render(Customer::full_name),
                Column::new("cc", "Documento"),
                Column::new("phone", "Teléfono"),
                Column::new("email", "Correo"),
                Column::new("city", "Ciudad"),
            ];
            render_list(ctx, &items, &list, &CRUD_ACTIONS, &columns)
        }
        CustomersCommand::Show { id } => show::<Customer>(ctx, id).await,
        CustomersCommand::Create(fields) => {
            let mut form = Form::<CustomerDraft>::open_create();
            fields.apply(&mut form.draft);
            submit(ctx, &form).await
        }
        CustomersCommand::Update { id, fields } => {
            let mut form = Form::<CustomerDraft>::open_edit(&ctx.api.get::<Customer>(id).await?);
            fields.apply(&mut form.draft);
            submit(ctx, &form).await
        }
        CustomersCommand::Delete { id, yes } => delete_record::<Customer>(ctx, id, yes).await,
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
