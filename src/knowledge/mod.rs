// Knowledge base of canned resolutions for common issues

use crate::classifier::Category;
use crate::language::Language;

/// Canned resolution text for a category in a language, if one exists
pub fn lookup(category: Category, language: Language) -> Option<&'static str> {
    let text = match (category, language) {
        (Category::PasswordReset, Language::Kk) => {
            "Құпия сөзді қалпына келтіру үшін: 1) https://portal.company.kz/reset бетіне кіріңіз 2) Email енгізіңіз 3) Хатты тексеріп, нұсқауларды орындаңыз"
        }
        (Category::PasswordReset, Language::Ru) => {
            "Для сброса пароля: 1) Перейдите на https://portal.company.kz/reset 2) Введите email 3) Проверьте почту и следуйте инструкциям"
        }
        (Category::VpnAccess, Language::Kk) => {
            "VPN қосылу үшін: 1) Cisco AnyConnect орнатыңыз 2) vpn.company.kz адресін қосыңыз 3) Корпоративтік тіркелгі деректерімен кіріңіз"
        }
        (Category::VpnAccess, Language::Ru) => {
            "Для подключения VPN: 1) Установите Cisco AnyConnect 2) Добавьте адрес vpn.company.kz 3) Войдите с корпоративными учетными данными"
        }
        (Category::EmailSetup, Language::Kk) => {
            "Email баптау: 1) Outlook ашыңыз 2) Файл > Тіркелгі қосу 3) Email және құпия сөзді енгізіңіз 4) Автоматты баптау аяқталуын күтіңіз"
        }
        (Category::EmailSetup, Language::Ru) => {
            "Настройка email: 1) Откройте Outlook 2) Файл > Добавить учетную запись 3) Введите email и пароль 4) Дождитесь автоматической настройки"
        }
        (Category::PrinterIssue, Language::Kk) => {
            "Принтер мәселесі: 1) Принтер қосулы екенін тексеріңіз 2) Кезекті тазалаңыз 3) Драйверді қайта орнатыңыз 4) Көмек керек болса тикет жасаңыз"
        }
        (Category::PrinterIssue, Language::Ru) => {
            "Проблема с принтером: 1) Проверьте подключение 2) Очистите очередь печати 3) Переустановите драйвер 4) Создайте тикет если нужна помощь"
        }
        (Category::SoftwareInstall, Language::Kk) => {
            "Бағдарлама орнату: Software Center арқылы керекті бағдарламаны іздеңіз. Тізімде жоқ болса, тикет жасаңыз"
        }
        (Category::SoftwareInstall, Language::Ru) => {
            "Установка ПО: Найдите нужную программу через Software Center. Если нет в списке - создайте тикет"
        }
        (Category::Other, _) => return None,
    };
    Some(text)
}
