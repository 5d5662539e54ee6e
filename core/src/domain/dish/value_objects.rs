use crate::domain::dish::entities::DishCategory;

#[derive(Debug, Clone)]
pub struct CreateDishInput {
    pub dish_code: String,
    pub dish_desc: String,
    pub category: DishCategory,
}

#[derive(Debug, Clone)]
pub struct UpdateDishInput {
    pub dish_code: String,
    pub dish_desc: Option<String>,
    pub category: Option<DishCategory>,
}
