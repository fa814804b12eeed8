use sea_query::Iden;

#[derive(Iden, Clone, Copy)]
pub enum Ingredient {
    Table,
    Id,
    UserId,
    Name,
    Category,
    StorageType,
    RegisteredAt,
    ExpiryDate,
    FreshnessStatus,
    Quantity,
    Unit,
    Memo,
    IsConsumed,
    IsWasted,
    ConsumedAt,
    PurchasePrice,
    Source,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum Notification {
    Table,
    Id,
    UserId,
    Type,
    IngredientId,
    Title,
    Body,
    Payload,
    ScheduledAt,
    SentAt,
    ReadAt,
    Status,
}
