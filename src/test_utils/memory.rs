//! An in-memory ledger for testing the analytics without SQLite.

use std::{
    collections::BTreeMap,
    ops::RangeInclusive,
    sync::{Arc, Mutex, MutexGuard},
};

use rust_decimal::Decimal;
use time::{Date, macros::date};

use crate::{
    Error, UserID,
    category::{Category, CategoryId, CategoryName, CategoryType, NewCategory},
    debt::{Debt, DebtId, DebtPayment, DebtPaymentId, NewDebt, NewDebtPayment},
    money::add_amount,
    stores::{
        AmountTotal, CategoryStore, CategoryTotal, DebtStore, SourceTotal, TransactionFilter,
        TransactionQuery, TransactionStore,
    },
    transaction::{Expense, Income, NewExpense, NewIncome, TransactionId, TransactionKind},
};

#[derive(Debug, Default)]
struct Records {
    next_id: i64,
    categories: Vec<Category>,
    incomes: Vec<Income>,
    expenses: Vec<Expense>,
    debts: Vec<Debt>,
    payments: Vec<DebtPayment>,
}

impl Records {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn category_type(&self, category_id: Option<CategoryId>) -> Option<CategoryType> {
        category_id.and_then(|id| {
            self.categories
                .iter()
                .find(|category| category.id == id)
                .map(|category| category.category_type)
        })
    }

    fn matches(
        &self,
        filter: &TransactionFilter,
        date: Date,
        category_id: Option<CategoryId>,
        source: Option<&str>,
    ) -> bool {
        let type_matches = filter
            .category_type
            .is_none_or(|wanted| self.category_type(category_id) == Some(wanted));
        let id_matches = filter
            .category_id
            .is_none_or(|wanted| category_id == Some(wanted));
        let source_matches = match (&filter.source, source) {
            (None, _) => true,
            (Some(wanted), Some(source)) => source.contains(wanted.as_str()),
            (Some(_), None) => false,
        };

        in_range(date, &filter.date_range) && type_matches && id_matches && source_matches
    }

    /// The source, amount and category of every record of `kind` owned by
    /// `user_id` that matches `filter`.
    fn entries(
        &self,
        kind: TransactionKind,
        user_id: UserID,
        filter: &TransactionFilter,
    ) -> Vec<(Option<String>, Decimal, Option<CategoryId>)> {
        match kind {
            TransactionKind::Income => self
                .incomes
                .iter()
                .filter(|income| {
                    income.user_id == user_id
                        && self.matches(
                            filter,
                            income.date,
                            income.category_id,
                            income.source.as_deref(),
                        )
                })
                .map(|income| (income.source.clone(), income.amount, income.category_id))
                .collect(),
            TransactionKind::Expense => {
                let filter = TransactionFilter {
                    source: None,
                    ..filter.clone()
                };

                self.expenses
                    .iter()
                    .filter(|expense| {
                        expense.user_id == user_id
                            && self.matches(&filter, expense.date, Some(expense.category_id), None)
                    })
                    .map(|expense| (None, expense.amount, Some(expense.category_id)))
                    .collect()
            }
        }
    }
}

/// Keeps ledger records in vectors. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryLedger {
    records: Arc<Mutex<Records>>,
}

impl MemoryLedger {
    fn records(&self) -> MutexGuard<'_, Records> {
        self.records.lock().expect("memory ledger lock poisoned")
    }

    pub(crate) fn insert_default_category(&self, name: &str, category_type: CategoryType) -> Category {
        let mut records = self.records();
        let category = Category {
            id: records.next_id(),
            name: CategoryName::new_unchecked(name),
            category_type,
            icon: None,
            color: None,
            is_default: true,
            user_id: None,
        };
        records.categories.push(category.clone());

        category
    }

    /// Store `income` under a new ID.
    pub(crate) fn insert_income(&self, mut income: Income) -> Income {
        let mut records = self.records();
        income.id = records.next_id();
        records.incomes.push(income.clone());

        income
    }

    /// Store `expense` under a new ID.
    pub(crate) fn insert_expense(&self, mut expense: Expense) -> Expense {
        let mut records = self.records();
        expense.id = records.next_id();
        records.expenses.push(expense.clone());

        expense
    }

    /// Store `debt` under a new ID.
    pub(crate) fn insert_debt(&self, mut debt: Debt) -> Debt {
        let mut records = self.records();
        debt.id = records.next_id();
        records.debts.push(debt.clone());

        debt
    }
}

pub(crate) fn income_on(
    user_id: UserID,
    amount: i64,
    date: Date,
    category_id: Option<CategoryId>,
) -> Income {
    Income {
        id: 0,
        amount: Decimal::from(amount),
        description: "Income".to_owned(),
        source: None,
        date,
        is_recurring: false,
        category_id,
        user_id,
    }
}

pub(crate) fn expense_on(
    user_id: UserID,
    amount: i64,
    date: Date,
    category_id: CategoryId,
) -> Expense {
    Expense {
        id: 0,
        amount: Decimal::from(amount),
        description: "Expense".to_owned(),
        date,
        is_recurring: false,
        category_id,
        user_id,
    }
}

pub(crate) fn debt_with_remaining(user_id: UserID, total: i64, remaining: i64) -> Debt {
    Debt {
        id: 0,
        name: "Loan".to_owned(),
        total_amount: Decimal::from(total),
        remaining_amount: Decimal::from(remaining),
        interest_rate: None,
        minimum_payment: None,
        due_date: None,
        start_date: date!(2024 - 01 - 01),
        category_id: None,
        user_id,
    }
}

fn in_range(date: Date, date_range: &Option<RangeInclusive<Date>>) -> bool {
    date_range
        .as_ref()
        .is_none_or(|date_range| date_range.contains(&date))
}

fn page<T>(mut records: Vec<T>, query: &TransactionQuery, key: impl Fn(&T) -> (Date, i64)) -> Vec<T> {
    records.sort_by_key(|record| std::cmp::Reverse(key(record)));

    records
        .into_iter()
        .skip(query.offset as usize)
        .take(query.limit.map_or(usize::MAX, |limit| limit as usize))
        .collect()
}

impl TransactionStore for MemoryLedger {
    fn create_income(&self, user_id: UserID, income: NewIncome) -> Result<Income, Error> {
        Ok(self.insert_income(Income {
            id: 0,
            amount: income.amount,
            description: income.description,
            source: income.source,
            date: income.date,
            is_recurring: income.is_recurring,
            category_id: income.category_id,
            user_id,
        }))
    }

    fn create_expense(&self, user_id: UserID, expense: NewExpense) -> Result<Expense, Error> {
        Ok(self.insert_expense(Expense {
            id: 0,
            amount: expense.amount,
            description: expense.description,
            date: expense.date,
            is_recurring: expense.is_recurring,
            category_id: expense.category_id,
            user_id,
        }))
    }

    fn get_income(&self, user_id: UserID, id: TransactionId) -> Result<Income, Error> {
        self.records()
            .incomes
            .iter()
            .find(|income| income.id == id && income.user_id == user_id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn get_expense(&self, user_id: UserID, id: TransactionId) -> Result<Expense, Error> {
        self.records()
            .expenses
            .iter()
            .find(|expense| expense.id == id && expense.user_id == user_id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn update_income(&self, income: &Income) -> Result<(), Error> {
        let mut records = self.records();
        let stored = records
            .incomes
            .iter_mut()
            .find(|stored| stored.id == income.id && stored.user_id == income.user_id)
            .ok_or(Error::NotFound)?;
        *stored = income.clone();

        Ok(())
    }

    fn update_expense(&self, expense: &Expense) -> Result<(), Error> {
        let mut records = self.records();
        let stored = records
            .expenses
            .iter_mut()
            .find(|stored| stored.id == expense.id && stored.user_id == expense.user_id)
            .ok_or(Error::NotFound)?;
        *stored = expense.clone();

        Ok(())
    }

    fn delete_transaction(
        &self,
        kind: TransactionKind,
        user_id: UserID,
        id: TransactionId,
    ) -> Result<(), Error> {
        let mut records = self.records();
        let removed = match kind {
            TransactionKind::Income => {
                let before = records.incomes.len();
                records
                    .incomes
                    .retain(|income| !(income.id == id && income.user_id == user_id));
                before - records.incomes.len()
            }
            TransactionKind::Expense => {
                let before = records.expenses.len();
                records
                    .expenses
                    .retain(|expense| !(expense.id == id && expense.user_id == user_id));
                before - records.expenses.len()
            }
        };

        if removed == 0 {
            Err(Error::NotFound)
        } else {
            Ok(())
        }
    }

    fn get_incomes(&self, user_id: UserID, query: &TransactionQuery) -> Result<Vec<Income>, Error> {
        let records = self.records();
        let incomes = records
            .incomes
            .iter()
            .filter(|income| {
                income.user_id == user_id
                    && records.matches(
                        &query.filter,
                        income.date,
                        income.category_id,
                        income.source.as_deref(),
                    )
            })
            .cloned()
            .collect();

        Ok(page(incomes, query, |income| (income.date, income.id)))
    }

    fn get_expenses(
        &self,
        user_id: UserID,
        query: &TransactionQuery,
    ) -> Result<Vec<Expense>, Error> {
        let records = self.records();
        let expenses = records
            .expenses
            .iter()
            .filter(|expense| {
                expense.user_id == user_id
                    && records.matches(&query.filter, expense.date, Some(expense.category_id), None)
            })
            .cloned()
            .collect();

        Ok(page(expenses, query, |expense| (expense.date, expense.id)))
    }

    fn sum_transactions(
        &self,
        kind: TransactionKind,
        user_id: UserID,
        filter: &TransactionFilter,
    ) -> Result<AmountTotal, Error> {
        let mut total = AmountTotal::default();

        for (_, amount, _) in self.records().entries(kind, user_id, filter) {
            total.total = add_amount(total.total, amount)?;
            total.count += 1;
        }

        Ok(total)
    }

    fn sum_transactions_by_category(
        &self,
        kind: TransactionKind,
        user_id: UserID,
        filter: &TransactionFilter,
    ) -> Result<Vec<CategoryTotal>, Error> {
        let mut groups: BTreeMap<Option<CategoryId>, AmountTotal> = BTreeMap::new();

        for (_, amount, category_id) in self.records().entries(kind, user_id, filter) {
            let group = groups.entry(category_id).or_default();
            group.total = add_amount(group.total, amount)?;
            group.count += 1;
        }

        Ok(groups
            .into_iter()
            .map(|(category_id, AmountTotal { total, count })| CategoryTotal {
                category_id,
                total,
                count,
            })
            .collect())
    }

    fn sum_incomes_by_source(
        &self,
        user_id: UserID,
        filter: &TransactionFilter,
    ) -> Result<Vec<SourceTotal>, Error> {
        let mut groups: BTreeMap<Option<String>, AmountTotal> = BTreeMap::new();

        for (source, amount, _) in self.records().entries(TransactionKind::Income, user_id, filter) {
            let group = groups.entry(source).or_default();
            group.total = add_amount(group.total, amount)?;
            group.count += 1;
        }

        Ok(groups
            .into_iter()
            .map(|(source, AmountTotal { total, count })| SourceTotal {
                source,
                total,
                count,
            })
            .collect())
    }
}

impl CategoryStore for MemoryLedger {
    fn create_category(&self, user_id: UserID, category: NewCategory) -> Result<Category, Error> {
        let mut records = self.records();

        let duplicate = records.categories.iter().any(|existing| {
            existing.user_id == Some(user_id)
                && existing.name == category.name
                && existing.category_type == category.category_type
        });
        if duplicate {
            return Err(Error::Conflict(format!(
                "the category \"{}\" already exists",
                category.name
            )));
        }

        let category = Category {
            id: records.next_id(),
            name: category.name,
            category_type: category.category_type,
            icon: category.icon,
            color: category.color,
            is_default: false,
            user_id: Some(user_id),
        };
        records.categories.push(category.clone());

        Ok(category)
    }

    fn get_visible_category(
        &self,
        user_id: UserID,
        category_id: CategoryId,
    ) -> Result<Category, Error> {
        self.records()
            .categories
            .iter()
            .find(|category| {
                category.id == category_id
                    && category.user_id.is_none_or(|owner| owner == user_id)
            })
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn get_visible_categories(
        &self,
        user_id: UserID,
        category_type: Option<CategoryType>,
    ) -> Result<Vec<Category>, Error> {
        let mut categories: Vec<Category> = self
            .records()
            .categories
            .iter()
            .filter(|category| {
                category.user_id.is_none_or(|owner| owner == user_id)
                    && category_type.is_none_or(|wanted| category.category_type == wanted)
            })
            .cloned()
            .collect();

        categories.sort_by(|a, b| {
            b.is_default
                .cmp(&a.is_default)
                .then_with(|| a.name.as_ref().cmp(b.name.as_ref()))
        });

        Ok(categories)
    }

    fn get_categories_by_ids(&self, category_ids: &[CategoryId]) -> Result<Vec<Category>, Error> {
        Ok(self
            .records()
            .categories
            .iter()
            .filter(|category| category_ids.contains(&category.id))
            .cloned()
            .collect())
    }

    fn update_category(&self, category: &Category) -> Result<(), Error> {
        let mut records = self.records();

        let duplicate = records.categories.iter().any(|existing| {
            existing.id != category.id
                && existing.user_id == category.user_id
                && existing.name == category.name
                && existing.category_type == category.category_type
        });
        if duplicate {
            return Err(Error::Conflict(format!(
                "the category \"{}\" already exists",
                category.name
            )));
        }

        let stored = records
            .categories
            .iter_mut()
            .find(|existing| {
                existing.id == category.id
                    && !existing.is_default
                    && category.user_id.is_some()
                    && existing.user_id == category.user_id
            })
            .ok_or(Error::NotFound)?;
        stored.name = category.name.clone();
        stored.icon = category.icon.clone();
        stored.color = category.color.clone();

        Ok(())
    }

    fn delete_category(&self, user_id: UserID, category_id: CategoryId) -> Result<(), Error> {
        let mut records = self.records();
        let position = records
            .categories
            .iter()
            .position(|category| category.id == category_id && category.user_id == Some(user_id))
            .ok_or(Error::NotFound)?;

        let incomes = records
            .incomes
            .iter()
            .filter(|income| income.category_id == Some(category_id))
            .count();
        let expenses = records
            .expenses
            .iter()
            .filter(|expense| expense.category_id == category_id)
            .count();
        let debts = records
            .debts
            .iter()
            .filter(|debt| debt.category_id == Some(category_id))
            .count();
        let references = incomes + expenses + debts;
        if references > 0 {
            return Err(Error::Conflict(format!(
                "the category \"{}\" is used by {references} record(s)",
                records.categories[position].name
            )));
        }

        records.categories.remove(position);

        Ok(())
    }
}

impl DebtStore for MemoryLedger {
    fn create_debt(&self, user_id: UserID, debt: NewDebt) -> Result<Debt, Error> {
        Ok(self.insert_debt(Debt {
            id: 0,
            name: debt.name,
            total_amount: debt.total_amount,
            remaining_amount: debt.total_amount,
            interest_rate: debt.interest_rate,
            minimum_payment: debt.minimum_payment,
            due_date: debt.due_date,
            start_date: debt.start_date,
            category_id: debt.category_id,
            user_id,
        }))
    }

    fn get_debt(&self, user_id: UserID, debt_id: DebtId) -> Result<Debt, Error> {
        self.records()
            .debts
            .iter()
            .find(|debt| debt.id == debt_id && debt.user_id == user_id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn get_debts(&self, user_id: UserID, settled: Option<bool>) -> Result<Vec<Debt>, Error> {
        let mut debts: Vec<Debt> = self
            .records()
            .debts
            .iter()
            .filter(|debt| {
                debt.user_id == user_id && settled.is_none_or(|settled| debt.is_settled() == settled)
            })
            .cloned()
            .collect();
        debts.sort_by_key(|debt| std::cmp::Reverse((debt.start_date, debt.id)));

        Ok(debts)
    }

    fn update_debt<F>(&self, user_id: UserID, debt_id: DebtId, edit: F) -> Result<Debt, Error>
    where
        F: FnOnce(Debt) -> Result<Debt, Error>,
    {
        let mut records = self.records();
        let stored = records
            .debts
            .iter_mut()
            .find(|debt| debt.id == debt_id && debt.user_id == user_id)
            .ok_or(Error::NotFound)?;
        let edited = edit(stored.clone())?;
        *stored = edited.clone();

        Ok(edited)
    }

    fn delete_debt(&self, user_id: UserID, debt_id: DebtId) -> Result<(), Error> {
        let mut records = self.records();
        let position = records
            .debts
            .iter()
            .position(|debt| debt.id == debt_id && debt.user_id == user_id)
            .ok_or(Error::NotFound)?;
        records.debts.remove(position);
        records.payments.retain(|payment| payment.debt_id != debt_id);

        Ok(())
    }

    fn get_debt_payments(&self, debt_id: DebtId) -> Result<Vec<DebtPayment>, Error> {
        let mut payments: Vec<DebtPayment> = self
            .records()
            .payments
            .iter()
            .filter(|payment| payment.debt_id == debt_id)
            .cloned()
            .collect();
        payments.sort_by_key(|payment| std::cmp::Reverse((payment.date, payment.id)));

        Ok(payments)
    }

    fn add_debt_payment<F>(
        &self,
        user_id: UserID,
        debt_id: DebtId,
        payment: NewDebtPayment,
        next_remaining: F,
    ) -> Result<DebtPayment, Error>
    where
        F: FnOnce(&Debt, &NewDebtPayment) -> Result<Decimal, Error>,
    {
        let mut records = self.records();
        let id = records.next_id();
        let debt = records
            .debts
            .iter_mut()
            .find(|debt| debt.id == debt_id && debt.user_id == user_id)
            .ok_or(Error::NotFound)?;
        debt.remaining_amount = next_remaining(debt, &payment)?;

        let payment = DebtPayment {
            id,
            amount: payment.amount,
            date: payment.date,
            note: payment.note,
            debt_id,
        };
        records.payments.push(payment.clone());

        Ok(payment)
    }

    fn delete_debt_payment<F>(
        &self,
        user_id: UserID,
        payment_id: DebtPaymentId,
        next_remaining: F,
    ) -> Result<DebtPayment, Error>
    where
        F: FnOnce(&Debt, &DebtPayment) -> Result<Decimal, Error>,
    {
        let mut records = self.records();
        let position = records
            .payments
            .iter()
            .position(|payment| payment.id == payment_id)
            .ok_or(Error::NotFound)?;
        let payment = records.payments[position].clone();
        let debt = records
            .debts
            .iter_mut()
            .find(|debt| debt.id == payment.debt_id && debt.user_id == user_id)
            .ok_or(Error::NotFound)?;
        debt.remaining_amount = next_remaining(debt, &payment)?;
        records.payments.remove(position);

        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error, UserID,
        category::{CategoryName, CategoryType, NewCategory},
        stores::CategoryStore,
    };

    use super::{MemoryLedger, expense_on};

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: CategoryName::new_unchecked(name),
            category_type: CategoryType::Variable,
            icon: None,
            color: None,
        }
    }

    #[test]
    fn update_rejects_defaults_and_taken_names() {
        let store = MemoryLedger::default();
        let user_id = UserID::new(1);
        let mut default = store.insert_default_category("Groceries", CategoryType::Variable);
        store.create_category(user_id, new_category("Pets")).unwrap();
        let mut toys = store.create_category(user_id, new_category("Toys")).unwrap();

        default.name = CategoryName::new_unchecked("Food");
        assert_eq!(store.update_category(&default), Err(Error::NotFound));

        toys.name = CategoryName::new_unchecked("Pets");
        assert!(matches!(store.update_category(&toys), Err(Error::Conflict(_))));

        toys.name = CategoryName::new_unchecked("Games");
        assert_eq!(store.update_category(&toys), Ok(()));
        assert_eq!(store.get_visible_category(user_id, toys.id), Ok(toys));
    }

    #[test]
    fn delete_refuses_referenced_category() {
        let store = MemoryLedger::default();
        let user_id = UserID::new(1);
        let pets = store.create_category(user_id, new_category("Pets")).unwrap();
        store.insert_expense(expense_on(user_id, 20, date!(2024 - 03 - 01), pets.id));

        let result = store.delete_category(user_id, pets.id);

        assert!(matches!(result, Err(Error::Conflict(_))));
        assert_eq!(store.get_visible_category(user_id, pets.id), Ok(pets));
    }
}
