use super::error::CartError;
use serde::{Deserialize, Serialize};
use shared::{BookId, UserId};

/// One cart line; `price` is the unit price captured when the line was last priced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub book_id: BookId,
    pub price: i64,
    pub qty: i64,
}

impl Item {
    /// Exact for any line of a cart whose totals were recomputed successfully
    pub fn line_total(&self) -> i64 {
        self.price * self.qty
    }

    pub fn checked_line_total(&self) -> Option<i64> {
        self.price.checked_mul(self.qty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub user_id: UserId,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub total_qty: i64,
    #[serde(default)]
    pub total_price: i64,
}

/// Requested line in an add or replace-all payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AddItem {
    pub book_id: BookId,
    pub qty: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustMode {
    Increase,
    Decrease,
    Set,
}

impl Cart {
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            items: Vec::new(),
            total_qty: 0,
            total_price: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `None` when the sum leaves the i64 range
    pub fn calculate_total_price(&self) -> Option<i64> {
        self.items
            .iter()
            .try_fold(0i64, |acc, item| acc.checked_add(item.checked_line_total()?))
    }

    pub fn calculate_total_qty(&self) -> Option<i64> {
        self.items
            .iter()
            .try_fold(0i64, |acc, item| acc.checked_add(item.qty))
    }

    pub fn recompute_totals(&mut self) -> Result<(), CartError> {
        let total_price = self
            .calculate_total_price()
            .ok_or(CartError::QuantityTooLarge)?;
        let total_qty = self
            .calculate_total_qty()
            .ok_or(CartError::QuantityTooLarge)?;
        self.total_price = total_price;
        self.total_qty = total_qty;
        Ok(())
    }

    /// Runs `change` on a copy and keeps it only if it and the new totals succeed
    fn apply<T>(
        &mut self,
        change: impl FnOnce(&mut Cart) -> Result<T, CartError>,
    ) -> Result<T, CartError> {
        let mut next = self.clone();
        let out = change(&mut next)?;
        next.recompute_totals()?;
        *self = next;
        Ok(out)
    }

    pub fn find_item(&self, book_id: BookId) -> Option<&Item> {
        self.items.iter().find(|item| item.book_id == book_id)
    }

    pub fn find_item_mut(&mut self, book_id: BookId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.book_id == book_id)
    }

    /// Merge into the existing line (qty summed, price refreshed) or append a new one
    pub fn add_item(&mut self, book_id: BookId, unit_price: i64, qty: i64) -> Result<(), CartError> {
        self.apply(|cart| {
            match cart.find_item_mut(book_id) {
                Some(item) => {
                    item.qty = item
                        .qty
                        .checked_add(qty)
                        .ok_or(CartError::QuantityTooLarge)?;
                    item.price = unit_price;
                }
                None => cart.items.push(Item {
                    book_id,
                    price: unit_price,
                    qty,
                }),
            }
            Ok(())
        })
    }

    pub fn set_quantity(&mut self, book_id: BookId, qty: i64) -> Result<(), CartError> {
        self.apply(|cart| {
            let item = cart
                .find_item_mut(book_id)
                .ok_or(CartError::ItemNotInCart(book_id))?;
            item.qty = qty;
            Ok(())
        })
    }

    pub fn replace_item(&mut self, book_id: BookId, unit_price: i64, qty: i64) -> Result<(), CartError> {
        self.apply(|cart| {
            let item = cart
                .find_item_mut(book_id)
                .ok_or(CartError::ItemNotInCart(book_id))?;
            item.price = unit_price;
            item.qty = qty;
            Ok(())
        })
    }

    /// Drops every line for `book_id`, keeping the order of the rest
    pub fn remove_item(&mut self, book_id: BookId) -> Result<bool, CartError> {
        if self.find_item(book_id).is_none() {
            return Ok(false);
        }
        self.apply(|cart| {
            cart.items.retain(|item| item.book_id != book_id);
            Ok(true)
        })
    }

    /// `unit_price` is only consulted for `Increase`
    pub fn adjust_quantity(
        &mut self,
        book_id: BookId,
        mode: AdjustMode,
        qty: i64,
        unit_price: i64,
    ) -> Result<(), CartError> {
        match mode {
            AdjustMode::Increase => self.add_item(book_id, unit_price, qty),
            AdjustMode::Set => self.set_quantity(book_id, qty),
            AdjustMode::Decrease => self.apply(|cart| {
                let item = cart
                    .find_item_mut(book_id)
                    .ok_or(CartError::ItemNotInCart(book_id))?;
                item.qty -= qty;
                if item.qty <= 0 {
                    cart.items.retain(|item| item.book_id != book_id);
                }
                Ok(())
            }),
        }
    }

    /// Replace every line; repeated book ids are merged
    pub fn replace_all(&mut self, lines: impl IntoIterator<Item = Item>) -> Result<(), CartError> {
        self.apply(|cart| {
            cart.items.clear();
            for line in lines {
                cart.add_item(line.book_id, line.price, line.qty)?;
            }
            Ok(())
        })
    }
}
