use serde::{Deserialize, Serialize};

use billsplit_core::{DomainResult, ExpenseId, Money, ParticipantHandle};
use billsplit_expenses::{NewExpense, ShareRequest, SplitKind, SplitPlan};
use billsplit_ledger::Settlement;
use billsplit_session::{ExpenseReceipt, GroupStatement, ParticipantStatement};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    #[serde(alias = "handle")]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct SplitInfoRequest {
    #[serde(alias = "handle")]
    pub email: String,
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub expense_type: SplitKind,
    pub name: String,
    pub paid_by: String,
    pub amount: f64,
    pub number_of_users: Option<usize>,
    pub split_info: Option<Vec<SplitInfoRequest>>,
}

impl CreateExpenseRequest {
    /// Parse handles and amounts; everything else is checked by the builder.
    pub fn into_new_expense(self) -> DomainResult<NewExpense> {
        let payer = ParticipantHandle::parse(self.paid_by)?;
        let amount = Money::from_major_f64(self.amount)?;

        let plan = match self.expense_type {
            SplitKind::Equal => SplitPlan::Equal,
            SplitKind::Unequal => SplitPlan::Unequal {
                declared_count: self.number_of_users,
                shares: self
                    .split_info
                    .unwrap_or_default()
                    .into_iter()
                    .map(|s| {
                        Ok(ShareRequest {
                            participant: ParticipantHandle::parse(s.email)?,
                            amount: Money::from_major_f64(s.amount)?,
                        })
                    })
                    .collect::<DomainResult<Vec<_>>>()?,
            },
        };

        Ok(NewExpense {
            description: self.name,
            payer,
            amount,
            plan,
        })
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct SuccessResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub fn success<T>(message: impl Into<String>, data: T) -> SuccessResponse<T> {
    SuccessResponse {
        success: true,
        message: message.into(),
        data: Some(data),
    }
}

#[derive(Debug, Serialize)]
pub struct ParticipantBody {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCreatedBody {
    pub expense_id: ExpenseId,
    pub settlements: Vec<Settlement>,
}

impl From<ExpenseReceipt> for ExpenseCreatedBody {
    fn from(receipt: ExpenseReceipt) -> Self {
        Self {
            expense_id: receipt.expense_id,
            settlements: receipt.settlements,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceBody {
    pub trxs: Vec<String>,
    pub total_share: Money,
}

impl From<&ParticipantStatement> for BalanceBody {
    fn from(statement: &ParticipantStatement) -> Self {
        Self {
            trxs: statement.rendered_lines(),
            total_share: statement.total,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancesBody {
    pub trxs: Vec<String>,
    pub total_group_spendings: Money,
}

impl From<&GroupStatement> for BalancesBody {
    fn from(statement: &GroupStatement) -> Self {
        Self {
            trxs: statement.rendered_lines(),
            total_group_spendings: statement.total_group_spend,
        }
    }
}
